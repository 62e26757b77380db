//! Form-wide submission state.
//!
//! The form owns the entered metadata and the latest per-category file
//! snapshots. Snapshots arrive whole (the upload batches publish their full
//! list on every change), so the form is stateless with respect to
//! individual file deltas: it just replaces the category's list. The form
//! never mutates a batch's list; all file mutation goes through the owning
//! batch.

use std::collections::BTreeMap;
use std::fmt;

use galley_core::models::{FileCategory, PublicationTrack, SubmissionPayload, UploadedFile};

/// Field-keyed validation errors, ordered for stable display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    fn from(map: BTreeMap<String, String>) -> Self {
        FieldErrors(map)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Submission form state.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub title: String,
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub track: Option<PublicationTrack>,
    pub corresponding_email: String,
    article_files: Vec<UploadedFile>,
    image_annexes: Vec<UploadedFile>,
    cover_image: Vec<UploadedFile>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the category's file list with the latest snapshot
    /// (last value wins).
    pub fn update_files(&mut self, category: FileCategory, snapshot: Vec<UploadedFile>) {
        match category {
            FileCategory::Document => self.article_files = snapshot,
            FileCategory::Image => self.image_annexes = snapshot,
            FileCategory::Cover => self.cover_image = snapshot,
        }
    }

    pub fn files(&self, category: FileCategory) -> &[UploadedFile] {
        match category {
            FileCategory::Document => &self.article_files,
            FileCategory::Image => &self.image_annexes,
            FileCategory::Cover => &self.cover_image,
        }
    }

    /// Build the submission payload from the current state. Completeness is
    /// checked by the aggregator, not here.
    pub fn to_payload(&self) -> Option<SubmissionPayload> {
        let track = self.track?;
        Some(SubmissionPayload {
            title: self.title.clone(),
            abstract_text: self.abstract_text.clone(),
            authors: self.authors.clone(),
            track,
            tags: self.tags.clone(),
            corresponding_email: self.corresponding_email.clone(),
            article_files: self.article_files.iter().map(|f| f.url.clone()).collect(),
            image_annexes: self.image_annexes.iter().map(|f| f.url.clone()).collect(),
            cover_image_url: self.cover_image.first().map(|f| f.url.clone()),
        })
    }

    /// Clear all entered state. Called after a successful submission only;
    /// a failed submission preserves everything.
    pub fn reset(&mut self) {
        *self = SubmissionForm::default();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.abstract_text.is_empty()
            && self.authors.is_empty()
            && self.tags.is_empty()
            && self.track.is_none()
            && self.corresponding_email.is_empty()
            && self.article_files.is_empty()
            && self.image_annexes.is_empty()
            && self.cover_image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(url: &str, category: FileCategory) -> UploadedFile {
        UploadedFile {
            url: url.to_string(),
            original_name: url.rsplit('/').next().unwrap_or(url).to_string(),
            size_bytes: 100,
            category,
        }
    }

    #[test]
    fn test_update_files_is_last_value_wins() {
        let mut form = SubmissionForm::new();
        form.update_files(
            FileCategory::Document,
            vec![uploaded("mock://a.pdf", FileCategory::Document)],
        );
        form.update_files(
            FileCategory::Document,
            vec![
                uploaded("mock://a.pdf", FileCategory::Document),
                uploaded("mock://b.pdf", FileCategory::Document),
            ],
        );
        assert_eq!(form.files(FileCategory::Document).len(), 2);
        assert!(form.files(FileCategory::Image).is_empty());
    }

    #[test]
    fn test_to_payload_preserves_url_order() {
        let mut form = SubmissionForm::new();
        form.title = "A title".to_string();
        form.track = Some(PublicationTrack::Adc);
        form.update_files(
            FileCategory::Document,
            vec![
                uploaded("mock://b.pdf", FileCategory::Document),
                uploaded("mock://a.pdf", FileCategory::Document),
            ],
        );

        let payload = form.to_payload().unwrap();
        assert_eq!(
            payload.article_files,
            vec!["mock://b.pdf".to_string(), "mock://a.pdf".to_string()]
        );
        assert!(payload.cover_image_url.is_none());
    }

    #[test]
    fn test_to_payload_requires_track() {
        let form = SubmissionForm::new();
        assert!(form.to_payload().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = SubmissionForm::new();
        form.title = "A title".to_string();
        form.update_files(
            FileCategory::Cover,
            vec![uploaded("mock://cover.jpg", FileCategory::Cover)],
        );
        assert!(!form.is_empty());
        form.reset();
        assert!(form.is_empty());
    }
}
