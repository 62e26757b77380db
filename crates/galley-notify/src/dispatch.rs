//! Submission notification dispatch.
//!
//! Packages a stored submission's attachments under the size budget and
//! delivers two emails: the editor notification (with attachments) and the
//! submitter confirmation. Both bodies carry the excluded-file summary, so a
//! dropped attachment is never invisible to anyone. Only failure to reach
//! SMTP itself is a dispatch failure; exclusions are informational.

use std::sync::Arc;
use std::time::Duration;

use galley_core::models::{Article, AttachmentManifest};
use galley_core::Config;

use crate::email::Mailer;
use crate::fetcher::{FetchError, FileFetcher, HttpFetcher};
use crate::packager::package_attachments;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("SMTP delivery failed: {0}")]
    Smtp(String),
}

pub struct Notifier {
    mailer: Option<Mailer>,
    fetcher: Arc<dyn FileFetcher>,
    budget_bytes: u64,
    editor_inbox: Option<String>,
}

impl Notifier {
    pub fn new(
        mailer: Option<Mailer>,
        fetcher: Arc<dyn FileFetcher>,
        budget_bytes: u64,
        editor_inbox: Option<String>,
    ) -> Self {
        Notifier {
            mailer,
            fetcher,
            budget_bytes,
            editor_inbox,
        }
    }

    /// Build the notifier from config: SMTP mailer (if configured) plus an
    /// HTTP fetcher with the configured per-file timeout.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.attachment_fetch_timeout_secs))?;
        Ok(Notifier {
            mailer: Mailer::from_config(config),
            fetcher: Arc::new(fetcher),
            budget_bytes: config.attachment_budget_bytes,
            editor_inbox: config.editor_inbox.clone(),
        })
    }

    /// Package the article's attachments and send the notification emails.
    ///
    /// Returns the manifest either way; when SMTP is not configured the
    /// packaging still runs and the result is logged instead of mailed.
    pub async fn dispatch_submission(
        &self,
        article: &Article,
    ) -> Result<AttachmentManifest, DispatchError> {
        let urls = article.attachment_urls();
        let packaged = package_attachments(self.fetcher.as_ref(), &urls, self.budget_bytes).await;
        let manifest = packaged.manifest.clone();

        tracing::info!(
            article_id = %article.id,
            included = manifest.included.len(),
            excluded = manifest.excluded.len(),
            total_size_bytes = manifest.total_size_bytes,
            "Attachments packaged"
        );

        let Some(mailer) = &self.mailer else {
            tracing::info!(
                article_id = %article.id,
                "Mailer not configured, skipping notification dispatch"
            );
            return Ok(manifest);
        };

        if let Some(editor_inbox) = &self.editor_inbox {
            let subject = format!("New submission: {}", article.title);
            let body = editor_body(article, &manifest);
            mailer
                .send_with_attachments(
                    std::slice::from_ref(editor_inbox),
                    &subject,
                    &body,
                    &packaged.files,
                )
                .await
                .map_err(DispatchError::Smtp)?;
        }

        let subject = format!("Submission received: {}", article.title);
        let body = confirmation_body(article, &manifest);
        mailer
            .send(
                std::slice::from_ref(&article.corresponding_email),
                &subject,
                &body,
            )
            .await
            .map_err(DispatchError::Smtp)?;

        Ok(manifest)
    }
}

fn excluded_section(manifest: &AttachmentManifest) -> String {
    if manifest.is_complete() {
        String::new()
    } else {
        format!(
            "\n\nThe following files could not be attached:\n{}\n",
            manifest.excluded_summary()
        )
    }
}

fn editor_body(article: &Article, manifest: &AttachmentManifest) -> String {
    format!(
        "A new submission has been received.\n\n\
         Title: {}\n\
         Track: {}\n\
         Authors: {}\n\
         Corresponding email: {}\n\
         Tags: {}\n\n\
         Abstract:\n{}\n\n\
         Attached files: {} ({} bytes total){}",
        article.title,
        article.track.as_str(),
        article.authors.join(", "),
        article.corresponding_email,
        article.tags.join(", "),
        article.abstract_text,
        manifest.included.len(),
        manifest.total_size_bytes,
        excluded_section(manifest),
    )
}

fn confirmation_body(article: &Article, manifest: &AttachmentManifest) -> String {
    format!(
        "Thank you for your submission \"{}\".\n\n\
         Your manuscript has been received and forwarded to the editorial \
         committee with {} attached file(s).{}\n\
         You will be contacted at this address once the review is complete.",
        article.title,
        manifest.included.len(),
        excluded_section(manifest),
    )
}
