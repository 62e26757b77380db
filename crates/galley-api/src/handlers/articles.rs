//! Article submission and read-back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use galley_core::models::{ArticleResponse, SubmissionPayload};
use galley_core::AppError;
use galley_submission::Aggregator;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/articles",
    tag = "articles",
    request_body = SubmissionPayload,
    responses(
        (status = 201, description = "Submission stored", body = ArticleResponse),
        (status = 400, description = "Submission incomplete", body = ErrorResponse),
        (status = 409, description = "Duplicate title", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn submit_article(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<(StatusCode, Json<ArticleResponse>), HttpAppError> {
    let aggregator = Aggregator::new(state.store.clone());
    let outcome = aggregator
        .submit_payload(payload)
        .await
        .map_err(HttpAppError::from)?;

    // Notification dispatch runs in the background: a failed or slow
    // notification never fails the submission response. Exclusions are
    // reported in the confirmation email.
    let notifier = state.notifier.clone();
    let article = outcome.article.clone();
    tokio::spawn(async move {
        if let Err(err) = notifier.dispatch_submission(&article).await {
            tracing::error!(
                article_id = %article.id,
                error = %err,
                "Notification dispatch failed"
            );
        }
    });

    Ok((StatusCode::CREATED, Json(outcome.article.into())))
}

#[utoipa::path(
    get,
    path = "/api/v0/articles/{id}",
    tag = "articles",
    params(
        ("id" = Uuid, Path, description = "Article id")
    ),
    responses(
        (status = 200, description = "Article found", body = ArticleResponse),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArticleResponse>, HttpAppError> {
    let article = state
        .store
        .get(id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;

    Ok(Json(article.into()))
}
