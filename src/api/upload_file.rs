use super::{HttpClient, ProgressCallback};
use crate::error::ApiError;
use crate::upload::SelectedFile;
use std::sync::Arc;
use tracing::debug;

/// PUTs the file straight to its pre-signed URL with the file's own content type.
pub async fn upload_file(
    client: &HttpClient,
    url: &str,
    file: &SelectedFile,
    on_progress: Option<ProgressCallback>,
) -> Result<(), ApiError> {
    debug!("Uploading {} ({} bytes)", file.name, file.size());
    client
        .put_bytes(url, Arc::clone(&file.bytes), &file.content_type, on_progress)
        .await?;
    debug!("Uploaded {}", file.name);
    Ok(())
}
