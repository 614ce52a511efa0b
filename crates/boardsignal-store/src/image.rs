//! Image collaborator: turns uploaded bytes into a stable URL.
//!
//! Where the bytes end up (object storage, CDN, local disk) is the
//! implementor's business. The room engine only needs the URL back.

use std::collections::HashMap;
use std::sync::Arc;

use boardsignal_protocol::ImageUpload;
use tokio::sync::Mutex;

use crate::ImageError;

/// Stores room images.
///
/// Implementations can write `async fn store(...)` directly; the desugared
/// signature below only adds the `Send` bound the engine needs.
pub trait ImageStore: Send + Sync + 'static {
    /// Stores `image` and returns its URL. `None` in gives `None` out
    /// without touching the backend.
    fn store(
        &self,
        image: Option<ImageUpload>,
    ) -> impl std::future::Future<Output = Result<Option<String>, ImageError>> + Send;
}

/// Keeps images in memory and hands out `<base_url>/<n>/<file_name>` URLs.
#[derive(Debug, Clone)]
pub struct MemoryImageStore {
    base_url: String,
    images: Arc<Mutex<HashMap<String, ImageUpload>>>,
}

impl MemoryImageStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            images: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the upload stored under `url`, if any.
    pub async fn get(&self, url: &str) -> Option<ImageUpload> {
        self.images.lock().await.get(url).cloned()
    }

    pub async fn len(&self) -> usize {
        self.images.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.images.lock().await.is_empty()
    }
}

impl Default for MemoryImageStore {
    fn default() -> Self {
        Self::new("memory://images")
    }
}

impl ImageStore for MemoryImageStore {
    async fn store(&self, image: Option<ImageUpload>) -> Result<Option<String>, ImageError> {
        let Some(image) = image else {
            return Ok(None);
        };
        if image.bytes.is_empty() {
            return Err(ImageError::Rejected(format!(
                "{} has no content",
                image.file_name
            )));
        }

        let mut images = self.images.lock().await;
        let url = format!("{}/{}/{}", self.base_url, images.len() + 1, image.file_name);
        tracing::debug!(%url, bytes = image.bytes.len(), "image stored");
        images.insert(url.clone(), image);
        Ok(Some(url))
    }
}
