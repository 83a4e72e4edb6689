//! Reference-image blob storage.
//!
//! Orders may carry one reference image, uploaded before the order row is
//! inserted. The store is a capability trait so the HTTP layer and tests can
//! swap implementations; the default stores files on the local filesystem
//! and serves them under a configured URL prefix. `remove` exists solely as
//! the compensating action for the create-order saga: if the insert fails
//! after a successful upload, the blob is deleted instead of orphaned.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Handle to a stored reference image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Storage-internal name of the blob.
    pub name: String,
    /// Public URL the storefront can render.
    pub public_url: String,
}

/// Capability interface over the blob storage service.
#[async_trait]
pub trait ReferenceImageStore: Send + Sync {
    /// Stores the image bytes under a unique name derived from `file_name`
    /// and returns its handle.
    async fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<StoredImage>;

    /// Removes a previously stored image. Used as the compensating action
    /// when the order insert fails after the upload succeeded.
    async fn remove(&self, stored: &StoredImage) -> Result<()>;
}

/// Filesystem-backed image store.
pub struct LocalImageStore {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    /// Creates a store rooted at `root`, serving images under `base_url`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Builds a unique stored name: upload timestamp plus the sanitized
    /// original file name.
    fn stored_name(file_name: &str) -> String {
        let safe: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}-{safe}", chrono::Utc::now().timestamp_millis())
    }
}

#[async_trait]
impl ReferenceImageStore for LocalImageStore {
    async fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<StoredImage> {
        let name = Self::stored_name(file_name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::ImageStore {
                message: format!("Failed to create image directory: {e}"),
            })?;
        tokio::fs::write(self.root.join(&name), bytes)
            .await
            .map_err(|e| Error::ImageStore {
                message: format!("Failed to write image: {e}"),
            })?;

        let public_url = format!("{}/{name}", self.base_url.trim_end_matches('/'));
        Ok(StoredImage { name, public_url })
    }

    async fn remove(&self, stored: &StoredImage) -> Result<()> {
        tokio::fs::remove_file(self.root.join(&stored.name))
            .await
            .map_err(|e| Error::ImageStore {
                message: format!("Failed to remove image: {e}"),
            })
    }
}
