//! Remote blob store implementation of the Backend trait.
//!
//! Speaks a plain HTTP blob protocol (S3/GCS-style): one object per
//! record at `{base}/{bucket}/{id}.json`, with the full digest carried in
//! an `x-meta-digest` header. The conditional create maps to a PUT with
//! `If-None-Match: *` - the server accepts the write only if the key does
//! not already exist, which gives the same atomicity as the filesystem
//! backend's exclusive create.
//!
//! A single `reqwest::Client` is held per backend value and reused across
//! requests (connection pooling); share the backend behind an `Arc` to
//! reuse it process-wide.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, IF_NONE_MATCH};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tracing::{debug, info, warn};

use filterstore_core::{Digest, FilterId};

use crate::error::{BackendError, Result};
use crate::record_key;
use crate::traits::{Backend, CreateOutcome};

/// Header carrying the full content digest as blob metadata.
const DIGEST_HEADER: &str = "x-meta-digest";

/// Configuration for the remote blob store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the blob service, e.g. `https://blobs.example.com`.
    pub base_url: String,
    /// Bucket (namespace) holding the filter records.
    pub bucket: String,
    /// Optional bearer token for authenticated stores.
    pub auth_token: Option<String>,
}

/// HTTP blob store backend.
pub struct RemoteBackend {
    client: Client,
    config: RemoteConfig,
}

impl RemoteBackend {
    /// Create a backend with a default client.
    pub fn new(config: RemoteConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a backend with a caller-provided client, e.g. one carrying
    /// a per-call timeout budget.
    pub fn with_client(client: Client, config: RemoteConfig) -> Self {
        Self { client, config }
    }

    fn blob_url(&self, id: &FilterId) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bucket,
            record_key(id)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.config.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Issue a HEAD request; `Ok(None)` means the key is absent.
    async fn head(&self, id: &FilterId) -> Result<Option<reqwest::Response>> {
        let response = self.request(Method::HEAD, &self.blob_url(id)).send().await?;
        match response.status() {
            status if status.is_success() => Ok(Some(response)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(status_error(status)),
        }
    }
}

/// Map an unexpected status to the error taxonomy: server-side failures
/// are transient, everything else is a protocol-level fault.
fn status_error(status: StatusCode) -> BackendError {
    if status.is_server_error() {
        BackendError::Unavailable {
            reason: format!("blob store answered {status}"),
        }
    } else {
        BackendError::Http {
            status: status.as_u16(),
        }
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    async fn exists(&self, id: &FilterId) -> Result<bool> {
        Ok(self.head(id).await?.is_some())
    }

    async fn read(&self, id: &FilterId) -> Result<Option<Vec<u8>>> {
        let response = self.request(Method::GET, &self.blob_url(id)).send().await?;
        match response.status() {
            status if status.is_success() => Ok(Some(response.bytes().await?.to_vec())),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(status_error(status)),
        }
    }

    async fn read_digest(&self, id: &FilterId) -> Result<Option<Digest>> {
        let Some(response) = self.head(id).await? else {
            return Ok(None);
        };

        let Some(value) = response.headers().get(DIGEST_HEADER) else {
            // Metadata gap; the allocator treats this as a collision and
            // widens, which costs a longer identifier but never dedups
            // against unverified content.
            warn!(id = %id, "blob has no digest metadata");
            return Ok(None);
        };

        let hex = value.to_str().map_err(|_| BackendError::InvalidData {
            id: id.to_string(),
            reason: "digest header is not valid ASCII".into(),
        })?;
        let digest = Digest::from_hex(hex).map_err(|e| BackendError::InvalidData {
            id: id.to_string(),
            reason: format!("bad digest metadata: {e}"),
        })?;
        Ok(Some(digest))
    }

    async fn create_if_absent(
        &self,
        id: &FilterId,
        body: &[u8],
        digest: &Digest,
    ) -> Result<CreateOutcome> {
        let response = self
            .request(Method::PUT, &self.blob_url(id))
            .header(IF_NONE_MATCH, "*")
            .header(CONTENT_TYPE, "application/json")
            .header(DIGEST_HEADER, digest.to_hex())
            .body(body.to_vec())
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                info!(id = %id, "uploaded new record blob");
                Ok(CreateOutcome::Created)
            }
            StatusCode::PRECONDITION_FAILED => {
                debug!(id = %id, "blob already exists, skipping upload");
                Ok(CreateOutcome::AlreadyExists)
            }
            status => Err(status_error(status)),
        }
    }

    async fn delete(&self, id: &FilterId) -> Result<bool> {
        let response = self
            .request(Method::DELETE, &self.blob_url(id))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                info!(id = %id, "deleted record blob");
                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                warn!(id = %id, "blob not found, skipping delete");
                Ok(false)
            }
            status => Err(status_error(status)),
        }
    }
}
