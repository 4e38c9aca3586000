use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request to {url} failed with status: {status}")]
    Status { status: u16, url: String },

    #[error("No upload URL was issued for {0}")]
    MissingUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("File type {0} is not accepted")]
    InvalidType(String),

    #[error("File is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("Failed to read file: {0}")]
    Unreadable(String),
}

/// A dropped or picked file that did not make it into the upload list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {reason}")]
pub struct FileRejection {
    pub name: String,
    pub reason: RejectReason,
}

impl FileRejection {
    pub fn new(name: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}
