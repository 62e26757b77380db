//! Galley Upload Library
//!
//! The upload manager: per-category file validation and the concurrent
//! upload batch. A batch turns local file selections into durable remote
//! URLs, enforcing the category policy before any storage call, and
//! publishes a full snapshot of its file list on every change.

pub mod batch;
pub mod pipeline;
pub mod validator;

pub use batch::{SelectedFile, SelectionReport, UploadBatch, UploadBatchState};
pub use pipeline::store_file;
pub use validator::{FileValidationError, FileValidator};
