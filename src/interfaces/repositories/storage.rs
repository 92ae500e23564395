use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScreenshotStorage: Send + Sync {
    /// Stores `bytes` under `path` inside the screenshot bucket
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    /// Publicly reachable URL for an object stored under `path`
    fn public_url(&self, path: &str) -> String;
}

#[async_trait]
impl<T: ScreenshotStorage + ?Sized> ScreenshotStorage for Arc<T> {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        (**self).upload(path, bytes, content_type).await
    }

    fn public_url(&self, path: &str) -> String {
        (**self).public_url(path)
    }
}
