use super::types::{SelectedFile, UploadStatus};
use crate::api::{ProgressCallback, UploadBackend};
use crate::error::ApiError;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Messages a running batch sends back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Upload progress of the file at `index` in the batch snapshot.
    Progress { index: usize, percent: u8 },
    /// Every upload settled; one status per snapshot index.
    Settled(Vec<UploadStatus>),
    /// Prepare-upload failed, so nothing was uploaded.
    Aborted(String),
}

pub type Notify = Arc<dyn Fn(BatchEvent) + Send + Sync>;

/// Requests upload URLs for `files`, then uploads all of them concurrently.
///
/// Always finishes with exactly one `Settled` or `Aborted` event. A failed upload never
/// cancels its siblings; each outcome is reported at the file's position in `files`.
pub async fn run_batch<B>(backend: &B, files: Vec<SelectedFile>, notify: Notify)
where
    B: UploadBackend + ?Sized,
{
    let file_names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
    info!("Preparing upload of {} files", file_names.len());

    let urls = match backend.prepare_upload(&file_names).await {
        Ok(urls) => urls,
        Err(e) => {
            warn!("Prepare-upload failed, batch aborted: {}", e);
            notify(BatchEvent::Aborted(e.to_string()));
            return;
        }
    };

    if urls.len() != files.len() {
        warn!(
            "Backend returned {} URLs for {} files",
            urls.len(),
            files.len()
        );
    }

    let uploads = files.iter().enumerate().map(|(index, file)| {
        let url = urls.get(index).cloned();
        let notify = Arc::clone(&notify);
        async move {
            let url = url.ok_or_else(|| ApiError::MissingUrl(file.name.clone()))?;
            let on_progress: ProgressCallback =
                Arc::new(move |percent: u8| notify(BatchEvent::Progress { index, percent }));
            backend.upload_file(&url, file, Some(on_progress)).await
        }
    });

    let outcomes = join_all(uploads).await;

    let statuses: Vec<UploadStatus> = outcomes
        .into_iter()
        .zip(&files)
        .map(|(outcome, file)| match outcome {
            Ok(()) => UploadStatus::Success,
            Err(e) => {
                warn!("Upload of {} failed: {}", file.name, e);
                UploadStatus::Failed
            }
        })
        .collect();

    let failed = statuses
        .iter()
        .filter(|s| **s == UploadStatus::Failed)
        .count();
    info!(
        "Batch finished: {} succeeded, {} failed",
        statuses.len() - failed,
        failed
    );

    notify(BatchEvent::Settled(statuses));
}
