mod client;
mod prepare_upload;
mod upload_file;

use crate::error::ApiError;
use crate::upload::SelectedFile;
use async_trait::async_trait;
use std::sync::Arc;

pub use client::{percentage, HttpClient, UPLOAD_CHUNK_SIZE};
pub use prepare_upload::{prepare_upload, PrepareUploadRequest, PrepareUploadResponse};
pub use upload_file::upload_file;

/// Receives upload completion as a whole percentage (0-100).
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// The two backend calls an upload batch depends on.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    async fn prepare_upload(&self, file_names: &[String]) -> Result<Vec<String>, ApiError>;

    async fn upload_file(
        &self,
        url: &str,
        file: &SelectedFile,
        on_progress: Option<ProgressCallback>,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl UploadBackend for HttpClient {
    async fn prepare_upload(&self, file_names: &[String]) -> Result<Vec<String>, ApiError> {
        prepare_upload(self, file_names).await
    }

    async fn upload_file(
        &self,
        url: &str,
        file: &SelectedFile,
        on_progress: Option<ProgressCallback>,
    ) -> Result<(), ApiError> {
        upload_file(self, url, file, on_progress).await
    }
}
