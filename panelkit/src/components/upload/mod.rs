//! FileUpload component - drop zone, file list and per-file upload state.
//!
//! Admitted files move `pending → uploading → success | error`. While the
//! upload hook runs, a simulated ramp adds 10 % every 200 ms up to 90 %;
//! the hook's [`ProgressReporter`] overrides it.

mod file;
mod render;
mod state;

pub use file::{FileEntry, SelectedFile, UploadStatus, file_icon};
pub use state::{
    FileUpload, FileUploadConfig, ProgressReporter, RemoveHook, UploadHook, UploadRejection,
};
