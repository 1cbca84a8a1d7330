//! Local filesystem implementation of the Backend trait.
//!
//! One record per identifier: the canonical body at `{id}.json` and the
//! full digest in a `{id}.sha256` sidecar. The conditional create writes
//! the body to a temp file and publishes it with `hard_link`, which fails
//! if the key already exists: the record appears atomically and with its
//! complete content, so there is no check-then-write race window and a
//! racing reader never observes a partial body.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use filterstore_core::{Digest, Digester, FilterId, Sha256Digester};

use crate::error::{BackendError, Result};
use crate::record_key;
use crate::traits::{Backend, CreateOutcome};

/// Filesystem backend rooted at a storage directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Use an existing directory as the storage root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage directory (and parents) if needed.
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn body_path(&self, id: &FilterId) -> PathBuf {
        self.root.join(record_key(id))
    }

    fn digest_path(&self, id: &FilterId) -> PathBuf {
        self.root.join(format!("{}.sha256", id.as_str()))
    }

    /// Persist the digest sidecar via temp file + atomic rename.
    ///
    /// Only the writer that won the exclusive create reaches this point,
    /// so the temp name cannot collide with another writer of the same id.
    async fn write_digest_sidecar(&self, id: &FilterId, digest: &Digest) -> Result<()> {
        let tmp = self.root.join(format!("{}.sha256.tmp", id.as_str()));
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(digest.to_hex().as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&tmp, self.digest_path(id)).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for FsBackend {
    async fn exists(&self, id: &FilterId) -> Result<bool> {
        Ok(fs::try_exists(self.body_path(id)).await?)
    }

    async fn read(&self, id: &FilterId) -> Result<Option<Vec<u8>>> {
        match fs::read(self.body_path(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_digest(&self, id: &FilterId) -> Result<Option<Digest>> {
        match fs::read_to_string(self.digest_path(id)).await {
            Ok(hex) => {
                let digest = Digest::from_hex(hex.trim()).map_err(|e| {
                    BackendError::InvalidData {
                        id: id.to_string(),
                        reason: format!("bad digest sidecar: {e}"),
                    }
                })?;
                Ok(Some(digest))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Sidecar may be missing if the process died between the
                // body create and the sidecar rename. The body bytes are
                // the exact hash input, so the digest is recoverable.
                match self.read(id).await? {
                    Some(body) => {
                        warn!(id = %id, "digest sidecar missing, re-hashing body");
                        Ok(Some(Sha256Digester.digest(&body)))
                    }
                    None => Ok(None),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_if_absent(
        &self,
        id: &FilterId,
        body: &[u8],
        digest: &Digest,
    ) -> Result<CreateOutcome> {
        static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

        let path = self.body_path(id);
        let tmp = self.root.join(format!(
            "{}.json.tmp.{}.{}",
            id.as_str(),
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed),
        ));

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(body).await?;
        file.sync_all().await?;
        drop(file);

        // The link either publishes the complete body under the key or
        // fails because the key is taken; never a partial record. Temp
        // cleanup is best-effort: the outcome is decided by the link.
        let linked = fs::hard_link(&tmp, &path).await;
        if let Err(e) = fs::remove_file(&tmp).await {
            warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
        }

        match linked {
            Ok(()) => {
                self.write_digest_sidecar(id, digest).await?;
                debug!(id = %id, path = %path.display(), "created record");
                Ok(CreateOutcome::Created)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(id = %id, "record already present, skipping create");
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &FilterId) -> Result<bool> {
        match fs::remove_file(self.body_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        match fs::remove_file(self.digest_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        debug!(id = %id, "deleted record");
        Ok(true)
    }
}
