use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// File category for a submission upload.
///
/// The category determines the validation policy (allowed types, size and
/// count limits) and the target bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Manuscript documents (pdf, doc, docx)
    Document,
    /// Image annexes (figures, plates)
    Image,
    /// Issue/article cover image
    Cover,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Document => "document",
            FileCategory::Image => "image",
            FileCategory::Cover => "cover",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successfully stored file.
///
/// Created when an upload resolves successfully; never mutated after
/// creation. Held in category-scoped lists until the submission form is
/// reset or the final submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedFile {
    /// Durable, publicly resolvable address of the stored object.
    pub url: String,
    /// Sanitized original filename, for display and attachment naming.
    pub original_name: String,
    /// Size known at upload time; re-verified at packaging time.
    pub size_bytes: u64,
    pub category: FileCategory,
}
