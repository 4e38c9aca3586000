use crate::error::FileRejection;
use crate::upload::{BatchEvent, SelectedFile, UploadItem, UploadStatus};
use tracing::debug;

/// Everything the upload screen shows, mutated only from the UI thread.
#[derive(Debug, Default)]
pub struct UploadState {
    pub items: Vec<UploadItem>,
    pub rejections: Vec<FileRejection>,
    pub is_loading: bool,
    next_id: u64,
    /// Item ids of the running batch, by snapshot index.
    batch_ids: Vec<u64>,
}

impl UploadState {
    /// Adds accepted files. A file whose name is already listed replaces that item in place.
    pub fn add_files(&mut self, files: Vec<SelectedFile>) {
        for file in files {
            self.next_id += 1;
            let item = UploadItem::new(self.next_id, file);
            match self.items.iter_mut().find(|existing| existing.file.name == item.file.name) {
                Some(existing) => {
                    debug!("Replacing {}", item.file.name);
                    *existing = item;
                }
                None => self.items.push(item),
            }
        }
    }

    pub fn set_rejections(&mut self, rejections: Vec<FileRejection>) {
        self.rejections = rejections;
    }

    pub fn can_modify(&self) -> bool {
        !self.is_loading && !self.items.is_empty()
    }

    pub fn can_upload(&self) -> bool {
        self.can_modify()
    }

    pub fn remove(&mut self, index: usize) -> Option<UploadItem> {
        if self.is_loading || index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    pub fn reset(&mut self) -> bool {
        if !self.can_modify() {
            return false;
        }
        self.items.clear();
        self.rejections.clear();
        true
    }

    /// Raises the loading flag and snapshots the files to upload, in list order.
    pub fn begin_batch(&mut self) -> Option<Vec<SelectedFile>> {
        if !self.can_upload() {
            return None;
        }
        self.is_loading = true;
        self.batch_ids = self.items.iter().map(|item| item.id).collect();
        Some(self.items.iter().map(|item| item.file.clone()).collect())
    }

    /// The item at a batch index, unless it was replaced after the batch started.
    fn batch_item_mut(&mut self, index: usize) -> Option<&mut UploadItem> {
        let id = *self.batch_ids.get(index)?;
        self.items.get_mut(index).filter(|item| item.id == id)
    }

    pub fn apply(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::Progress { index, percent } => {
                if let Some(item) = self.batch_item_mut(index) {
                    item.progress = percent.min(100);
                }
            }
            BatchEvent::Settled(statuses) => {
                for (index, status) in statuses.into_iter().enumerate() {
                    if let Some(item) = self.batch_item_mut(index) {
                        item.status = status;
                        // Progress counts bytes handed to the transport, not bytes the
                        // server kept, so a failed upload shows an empty bar.
                        if status == UploadStatus::Failed {
                            item.progress = 0;
                        }
                    }
                }
                self.finish_batch();
            }
            BatchEvent::Aborted(_) => {
                self.finish_batch();
            }
        }
    }

    fn finish_batch(&mut self) {
        self.is_loading = false;
        self.batch_ids.clear();
    }

    pub fn count(&self, status: UploadStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }
}
