use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Why a file was left out of the attachment set.
///
/// `TooLarge` is a policy decision (the file would blow the budget), not a
/// failure; `FetchFailed` is a true failure (network error, missing object,
/// timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    TooLarge,
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IncludedAttachment {
    pub url: String,
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExcludedAttachment {
    pub url: String,
    pub name: String,
    pub reason: ExclusionReason,
}

/// Output of the attachment packager for one submission.
///
/// Computed once per submission and never persisted; it exists for the
/// duration of the outbound notification call. The excluded list is always
/// surfaced back to the submitter so dropped attachments are never invisible.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AttachmentManifest {
    pub included: Vec<IncludedAttachment>,
    pub excluded: Vec<ExcludedAttachment>,
    pub total_size_bytes: u64,
}

impl AttachmentManifest {
    pub fn is_complete(&self) -> bool {
        self.excluded.is_empty()
    }

    /// Human-readable summary of exclusions, one line per file. Empty string
    /// when nothing was excluded.
    pub fn excluded_summary(&self) -> String {
        self.excluded
            .iter()
            .map(|e| {
                let reason = match e.reason {
                    ExclusionReason::TooLarge => "exceeds the attachment size budget",
                    ExclusionReason::FetchFailed => "could not be retrieved",
                };
                format!("- {} ({}): {}", e.name, e.url, reason)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_reason_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ExclusionReason::TooLarge).unwrap(),
            "\"too_large\""
        );
        assert_eq!(
            serde_json::to_string(&ExclusionReason::FetchFailed).unwrap(),
            "\"fetch_failed\""
        );
    }

    #[test]
    fn test_excluded_summary_lists_every_file() {
        let manifest = AttachmentManifest {
            included: vec![],
            excluded: vec![
                ExcludedAttachment {
                    url: "https://cdn.example.org/a.pdf".to_string(),
                    name: "a.pdf".to_string(),
                    reason: ExclusionReason::TooLarge,
                },
                ExcludedAttachment {
                    url: "https://cdn.example.org/b.pdf".to_string(),
                    name: "b.pdf".to_string(),
                    reason: ExclusionReason::FetchFailed,
                },
            ],
            total_size_bytes: 0,
        };
        let summary = manifest.excluded_summary();
        assert!(summary.contains("a.pdf"));
        assert!(summary.contains("budget"));
        assert!(summary.contains("b.pdf"));
        assert!(summary.contains("retrieved"));
        assert!(!manifest.is_complete());
    }
}
