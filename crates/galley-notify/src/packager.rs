//! Attachment packaging under a hard size budget.
//!
//! Inclusion is greedy and order-preserving: files are evaluated strictly in
//! list order, so the submitter's upload order acts as the priority signal
//! (first-uploaded files are most likely the primary manuscript) and the
//! result is deterministic regardless of how the fetches interleave. This is
//! intentionally not a knapsack solve; reordering which files get dropped is
//! a user-visible behavior change.

use galley_core::models::{
    AttachmentManifest, ExcludedAttachment, ExclusionReason, IncludedAttachment,
};

use crate::fetcher::{file_name_from_url, FetchedFile, FileFetcher};

/// Manifest plus the bytes of the included files, ready for the mailer.
#[derive(Debug, Default)]
pub struct PackagedAttachments {
    pub manifest: AttachmentManifest,
    pub files: Vec<FetchedFile>,
}

/// Resolve `urls` to bytes and decide inclusion per file against
/// `budget_bytes`.
///
/// Per file, in order: a failed fetch excludes it with `FetchFailed`; a file
/// that would push the running total past the budget is excluded with
/// `TooLarge`. Neither aborts the batch - every remaining file is still
/// evaluated, so a small file after an oversized one can still be included.
pub async fn package_attachments(
    fetcher: &dyn FileFetcher,
    urls: &[String],
    budget_bytes: u64,
) -> PackagedAttachments {
    let mut packaged = PackagedAttachments::default();
    let mut running_total: u64 = 0;

    for url in urls {
        let fetched = match fetcher.fetch(url).await {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Attachment fetch failed");
                packaged.manifest.excluded.push(ExcludedAttachment {
                    url: url.clone(),
                    name: file_name_from_url(url),
                    reason: ExclusionReason::FetchFailed,
                });
                continue;
            }
        };

        let size_bytes = fetched.size_bytes();
        if running_total + size_bytes <= budget_bytes {
            running_total += size_bytes;
            tracing::debug!(
                url = %url,
                size_bytes,
                running_total,
                "Attachment included"
            );
            packaged.manifest.included.push(IncludedAttachment {
                url: fetched.url.clone(),
                name: fetched.name.clone(),
                size_bytes,
            });
            packaged.files.push(fetched);
        } else {
            tracing::info!(
                url = %url,
                size_bytes,
                running_total,
                budget_bytes,
                "Attachment excluded: over budget"
            );
            packaged.manifest.excluded.push(ExcludedAttachment {
                url: fetched.url,
                name: fetched.name,
                reason: ExclusionReason::TooLarge,
            });
        }
    }

    packaged.manifest.total_size_bytes = running_total;
    packaged
}
