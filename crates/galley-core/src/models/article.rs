use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Publication track of the journal organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PublicationTrack {
    /// Revue Haïtienne de Chirurgie et d'Anesthésiologie
    Rhca,
    /// Info Gazette Médicale
    Igm,
    /// Atlas de Diagnostic Chirurgical
    Adc,
    IndexMedicus,
}

impl PublicationTrack {
    /// Tracks that go to print with a cover require a cover image at
    /// submission time.
    pub fn requires_cover(&self) -> bool {
        matches!(self, PublicationTrack::Rhca | PublicationTrack::Igm)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationTrack::Rhca => "rhca",
            PublicationTrack::Igm => "igm",
            PublicationTrack::Adc => "adc",
            PublicationTrack::IndexMedicus => "index_medicus",
        }
    }
}

/// Submission payload assembled once, at submit time.
///
/// Valid only if every required metadata field is present and within bounds
/// AND `article_files` is non-empty. Field bounds are enforced by the
/// `Validate` derive; the file/cover completeness gates live in the
/// aggregator because they depend on the publication track.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmissionPayload {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[validate(length(min = 50, max = 2000))]
    pub abstract_text: String,
    #[validate(length(min = 1))]
    pub authors: Vec<String>,
    pub track: PublicationTrack,
    #[validate(length(min = 1))]
    pub tags: Vec<String>,
    #[validate(email)]
    pub corresponding_email: String,
    /// Durable URLs of the manuscript documents. Must be non-empty.
    pub article_files: Vec<String>,
    /// Durable URLs of image annexes. May be empty.
    #[serde(default)]
    pub image_annexes: Vec<String>,
    /// Durable URL of the cover image; required for tracks that print a cover.
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Curation status of a stored article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Pending,
    Approved,
    Rejected,
}

/// Stored article record.
///
/// The URL lists round-trip exactly from the payload: no reordering, no
/// deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub track: PublicationTrack,
    pub tags: Vec<String>,
    pub corresponding_email: String,
    pub article_files: Vec<String>,
    pub image_annexes: Vec<String>,
    pub cover_image_url: Option<String>,
    pub status: ArticleStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Article {
    /// Build a new article record from a validated submission payload.
    pub fn from_payload(payload: SubmissionPayload) -> Self {
        Article {
            id: Uuid::new_v4(),
            title: payload.title,
            abstract_text: payload.abstract_text,
            authors: payload.authors,
            track: payload.track,
            tags: payload.tags,
            corresponding_email: payload.corresponding_email,
            article_files: payload.article_files,
            image_annexes: payload.image_annexes,
            cover_image_url: payload.cover_image_url,
            status: ArticleStatus::Pending,
            submitted_at: Utc::now(),
        }
    }

    /// All attachment URLs in packaging priority order: manuscripts first,
    /// then annexes, then the cover. Upload order within each list is
    /// preserved.
    pub fn attachment_urls(&self) -> Vec<String> {
        let mut urls = Vec::with_capacity(
            self.article_files.len() + self.image_annexes.len() + 1,
        );
        urls.extend(self.article_files.iter().cloned());
        urls.extend(self.image_annexes.iter().cloned());
        if let Some(cover) = &self.cover_image_url {
            urls.push(cover.clone());
        }
        urls
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub track: PublicationTrack,
    pub status: ArticleStatus,
    pub article_files: Vec<String>,
    pub image_annexes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        ArticleResponse {
            id: article.id,
            title: article.title,
            track: article.track,
            status: article.status,
            article_files: article.article_files,
            image_annexes: article.image_annexes,
            cover_image_url: article.cover_image_url,
            submitted_at: article.submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_payload() -> SubmissionPayload {
        SubmissionPayload {
            title: "Laparoscopic management of hepatic cysts".to_string(),
            abstract_text: "A".repeat(120),
            authors: vec!["J. Baptiste".to_string(), "M. Pierre".to_string()],
            track: PublicationTrack::Rhca,
            tags: vec!["surgery".to_string()],
            corresponding_email: "j.baptiste@example.org".to_string(),
            article_files: vec![
                "https://cdn.example.org/article-documents/a.pdf".to_string(),
                "https://cdn.example.org/article-documents/b.pdf".to_string(),
            ],
            image_annexes: vec!["https://cdn.example.org/article-annexes/fig1.png".to_string()],
            cover_image_url: Some(
                "https://cdn.example.org/article-covers/cover.jpg".to_string(),
            ),
        }
    }

    #[test]
    fn test_requires_cover_by_track() {
        assert!(PublicationTrack::Rhca.requires_cover());
        assert!(PublicationTrack::Igm.requires_cover());
        assert!(!PublicationTrack::Adc.requires_cover());
        assert!(!PublicationTrack::IndexMedicus.requires_cover());
    }

    /// Payload -> record round-trip preserves the URL lists exactly:
    /// no reordering, no deduplication.
    #[test]
    fn test_from_payload_preserves_url_lists() {
        let payload = test_payload();
        let files = payload.article_files.clone();
        let annexes = payload.image_annexes.clone();
        let cover = payload.cover_image_url.clone();

        let article = Article::from_payload(payload);

        assert_eq!(article.article_files, files);
        assert_eq!(article.image_annexes, annexes);
        assert_eq!(article.cover_image_url, cover);
        assert_eq!(article.status, ArticleStatus::Pending);
    }

    #[test]
    fn test_attachment_urls_order() {
        let article = Article::from_payload(test_payload());
        let urls = article.attachment_urls();
        assert_eq!(urls.len(), 4);
        assert!(urls[0].ends_with("a.pdf"));
        assert!(urls[1].ends_with("b.pdf"));
        assert!(urls[2].ends_with("fig1.png"));
        assert!(urls[3].ends_with("cover.jpg"));
    }

    #[test]
    fn test_payload_field_bounds() {
        use validator::Validate;

        let mut payload = test_payload();
        assert!(payload.validate().is_ok());

        payload.title = "ab".to_string();
        assert!(payload.validate().is_err());

        let mut payload = test_payload();
        payload.abstract_text = "too short".to_string();
        assert!(payload.validate().is_err());

        let mut payload = test_payload();
        payload.authors.clear();
        assert!(payload.validate().is_err());

        let mut payload = test_payload();
        payload.corresponding_email = "not-an-email".to_string();
        assert!(payload.validate().is_err());
    }
}
