//! Submission gating and dispatch.
//!
//! All preconditions are checked synchronously before anything leaves the
//! process: there is no partial submission. Store failures are reported once
//! and leave the form state untouched so the submitter does not lose work.
//! Re-submitting after a failure may create a duplicate unless the store
//! enforces uniqueness; only the title carries such a constraint.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use galley_core::models::{Article, SubmissionPayload};
use galley_core::validation::collect_field_errors;

use crate::form::{FieldErrors, SubmissionForm};
use crate::store::{ArticleStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission is incomplete: {0}")]
    Invalid(FieldErrors),

    #[error("An article with this title already exists")]
    TitleConflict,

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl SubmitError {
    /// Field-level messages for errors attributable to a field.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors.clone()),
            SubmitError::TitleConflict => {
                let mut errors = FieldErrors::new();
                errors.insert("title", "An article with this title already exists");
                Some(errors)
            }
            SubmitError::Store(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub article: Article,
}

/// Receives the validated article record. The default handler inserts into
/// the content store; callers may supply their own to take over the
/// submission path.
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    async fn handle(&self, article: Article) -> Result<Uuid, StoreError>;
}

struct StoreHandler {
    store: Arc<dyn ArticleStore>,
}

#[async_trait]
impl SubmissionHandler for StoreHandler {
    async fn handle(&self, article: Article) -> Result<Uuid, StoreError> {
        self.store.insert(article).await
    }
}

/// Validate completeness of a payload. Every failing gate produces a
/// distinct field-keyed error; the file and cover gates run in addition to
/// the field-bound checks.
pub fn validate_payload(payload: &SubmissionPayload) -> FieldErrors {
    let mut errors = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(validation_errors) => FieldErrors::from(collect_field_errors(&validation_errors)),
    };

    if payload.article_files.is_empty() {
        errors.insert("files", "At least one article document is required");
    }

    if payload.track.requires_cover() && payload.cover_image_url.is_none() {
        errors.insert(
            "cover_image",
            "A cover image is required for this publication track",
        );
    }

    errors
}

/// The submission aggregator.
pub struct Aggregator {
    handler: Arc<dyn SubmissionHandler>,
}

impl Aggregator {
    /// Default submission path: direct insert into the content store.
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Aggregator {
            handler: Arc::new(StoreHandler { store }),
        }
    }

    /// Use a caller-supplied handler instead of the default store insert.
    pub fn with_handler(handler: Arc<dyn SubmissionHandler>) -> Self {
        Aggregator { handler }
    }

    /// Gate and dispatch a payload. The completeness check is the only gate
    /// before handoff; nothing reaches the handler if it fails.
    pub async fn submit_payload(
        &self,
        payload: SubmissionPayload,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let errors = validate_payload(&payload);
        if !errors.is_empty() {
            tracing::debug!(errors = %errors, "Submission rejected by completeness gate");
            return Err(SubmitError::Invalid(errors));
        }

        let article = Article::from_payload(payload);
        let article_id = article.id;

        match self.handler.handle(article.clone()).await {
            Ok(_) => {
                tracing::info!(
                    article_id = %article_id,
                    title = %article.title,
                    track = %article.track.as_str(),
                    files = article.article_files.len(),
                    annexes = article.image_annexes.len(),
                    "Submission stored"
                );
                Ok(SubmissionOutcome { article })
            }
            Err(StoreError::UniqueViolation { constraint }) => {
                tracing::debug!(
                    title = %article.title,
                    constraint = %constraint,
                    "Duplicate title rejected by store"
                );
                Err(SubmitError::TitleConflict)
            }
            Err(err) => {
                tracing::error!(error = %err, "Submission failed at store");
                Err(SubmitError::Store(err))
            }
        }
    }

    /// Submit a form. On success the form resets to empty; on failure all
    /// entered state is preserved for retry.
    pub async fn submit_form(
        &self,
        form: &mut SubmissionForm,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let payload = match form.to_payload() {
            Some(payload) => payload,
            None => {
                let mut errors = FieldErrors::new();
                errors.insert("track", "A publication track is required");
                return Err(SubmitError::Invalid(errors));
            }
        };

        let outcome = self.submit_payload(payload).await?;
        form.reset();
        Ok(outcome)
    }
}
