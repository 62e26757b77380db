//! Galley Submission Library
//!
//! The submission aggregator: form-wide state, completeness gating, payload
//! construction, and the content-store boundary. The aggregator holds the
//! latest per-category file snapshots plus the entered metadata, validates
//! completeness synchronously at submit time, and hands the payload to the
//! store (or a caller-supplied handler).

pub mod aggregator;
pub mod form;
pub mod store;

pub use aggregator::{Aggregator, SubmissionHandler, SubmissionOutcome, SubmitError};
pub use form::{FieldErrors, SubmissionForm};
pub use store::{ArticleStore, MemoryArticleStore, StoreError};
