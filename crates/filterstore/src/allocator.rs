//! Identifier allocation: the shortest collision-checked digest prefix.
//!
//! Starting at 16 hex characters, the allocator widens the prefix only on
//! a verified truncation collision (an existing record whose full digest
//! differs). Ordinary duplicate saves always reuse the existing
//! identifier at its original length, and a lost create race is re-examined
//! at the same width so concurrent savers of equal content converge on one
//! identifier and one record. Deterministic; no randomness.

use tracing::{debug, warn};

use filterstore_backend::{Backend, CreateOutcome};
use filterstore_core::{Digest, FilterId, MAX_ID_LEN, MIN_ID_LEN};

use crate::error::{Result, StoreError};

/// Outcome of a successful allocation.
#[derive(Debug, Clone)]
pub struct Allocation {
    /// The identifier now holding the record.
    pub id: FilterId,
    /// Whether this call created the record, as opposed to reusing one
    /// stored by an earlier (or concurrent) identical save.
    pub created: bool,
}

/// Allocate an identifier for a digest, storing `body` if the content is new.
pub(crate) async fn allocate<B: Backend>(
    backend: &B,
    digest: &Digest,
    body: &[u8],
) -> Result<Allocation> {
    let mut tried = Vec::new();
    let mut k = MIN_ID_LEN;

    while k <= MAX_ID_LEN {
        let candidate = digest.id_prefix(k);

        if !backend.exists(&candidate).await? {
            match backend.create_if_absent(&candidate, body, digest).await? {
                CreateOutcome::Created => {
                    debug!(id = %candidate, "allocated new identifier");
                    return Ok(Allocation {
                        id: candidate,
                        created: true,
                    });
                }
                CreateOutcome::AlreadyExists => {
                    // Lost a race to a concurrent writer. Re-examine the
                    // same width: if the winner stored our content we
                    // reuse its record, otherwise we widen below.
                    debug!(id = %candidate, "lost create race, re-checking");
                    continue;
                }
            }
        }

        match backend.read_digest(&candidate).await? {
            Some(stored) if stored == *digest => {
                debug!(id = %candidate, "content already stored, reusing identifier");
                return Ok(Allocation {
                    id: candidate,
                    created: false,
                });
            }
            _ => {
                // Different full digest behind the same prefix (or
                // unreadable metadata): a truncation collision. Widen.
                warn!(id = %candidate, "truncation collision, extending prefix");
                tried.push(candidate.as_str().to_string());
                k += 1;
            }
        }
    }

    Err(StoreError::HashSpaceExhausted {
        digest: digest.to_hex(),
        tried,
    })
}
