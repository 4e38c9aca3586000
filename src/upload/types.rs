use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

pub fn guess_content_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// A file accepted for upload. Bytes are shared so batches can take cheap copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Guesses the content type from the file name, falling back to `application/octet-stream`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name);
        Self::with_content_type(name, content_type, bytes)
    }

    pub fn with_content_type(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Unique per list entry; a replaced file gets a fresh id.
    pub id: u64,
    pub file: SelectedFile,
    pub status: UploadStatus,
    pub progress: u8,
}

impl UploadItem {
    pub fn new(id: u64, file: SelectedFile) -> Self {
        Self {
            id,
            file,
            status: UploadStatus::Pending,
            progress: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.file.name
    }
}
