//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use galley_core::models::{
    ArticleResponse, ArticleStatus, AttachmentManifest, ExcludedAttachment, ExclusionReason,
    FileCategory, IncludedAttachment, PublicationTrack, SubmissionPayload, UploadedFile,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::uploads::upload_file,
        handlers::articles::submit_article,
        handlers::articles::get_article,
    ),
    components(schemas(
        FileCategory,
        UploadedFile,
        PublicationTrack,
        SubmissionPayload,
        ArticleStatus,
        ArticleResponse,
        AttachmentManifest,
        IncludedAttachment,
        ExcludedAttachment,
        ExclusionReason,
        ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Per-category file uploads"),
        (name = "articles", description = "Article submission and read-back"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
