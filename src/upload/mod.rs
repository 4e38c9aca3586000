mod batch;
mod selection;
mod types;

pub use batch::{run_batch, BatchEvent, Notify};
pub use selection::FilePolicy;
pub use types::{SelectedFile, UploadItem, UploadStatus};
