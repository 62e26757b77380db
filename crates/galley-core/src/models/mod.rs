//! Domain models

pub mod article;
pub mod file;
pub mod manifest;

pub use article::{
    Article, ArticleResponse, ArticleStatus, PublicationTrack, SubmissionPayload,
};
pub use file::{FileCategory, UploadedFile};
pub use manifest::{
    AttachmentManifest, ExcludedAttachment, ExclusionReason, IncludedAttachment,
};
