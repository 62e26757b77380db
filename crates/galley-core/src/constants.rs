//! Shared constants.

/// Hard ceiling on the summed size of attachments packaged for one
/// outbound notification email.
pub const ATTACHMENT_BUDGET_BYTES: u64 = 45 * 1024 * 1024;

/// Per-file fetch timeout applied by the attachment packager. A hanging
/// URL is treated the same as a failed fetch.
pub const ATTACHMENT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Default bucket names per file category. Bucket identity is an opaque
/// configuration string; these are only the out-of-the-box values.
pub const DEFAULT_DOCUMENT_BUCKET: &str = "article-documents";
pub const DEFAULT_IMAGE_BUCKET: &str = "article-annexes";
pub const DEFAULT_COVER_BUCKET: &str = "article-covers";
