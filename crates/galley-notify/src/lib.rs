//! Galley Notify Library
//!
//! The attachment packager and outbound email dispatch: resolve a
//! submission's file URLs to bytes, apply the attachment size budget, and
//! deliver the editor notification plus the submitter confirmation. Files
//! excluded by the packager are always reported back to the submitter.

pub mod dispatch;
pub mod email;
pub mod fetcher;
pub mod packager;

pub use dispatch::{DispatchError, Notifier};
pub use email::Mailer;
pub use fetcher::{FetchError, FetchedFile, FileFetcher, HttpFetcher};
pub use packager::{package_attachments, PackagedAttachments};
