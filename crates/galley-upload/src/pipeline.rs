//! Single-file upload flow: sanitize → key → store.
//!
//! Validation happens before this module is reached (at selection time, in
//! [`UploadBatch`](crate::batch::UploadBatch) or at the HTTP edge); this is
//! the storage-facing half of the pipeline.

use anyhow::{Context, Result};
use std::sync::Arc;
use uuid::Uuid;

use galley_core::models::{FileCategory, UploadedFile};
use galley_storage::Storage;

pub(crate) fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let path = std::path::Path::new(filename);
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "invalid_filename".to_string();
    }
    let s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.trim().is_empty() || s.len() < 3 {
        "file".to_string()
    } else {
        s
    }
}

/// Upload one accepted file under a collision-resistant name and return the
/// resulting [`UploadedFile`].
pub async fn store_file(
    storage: Arc<dyn Storage>,
    bucket: &str,
    original_filename: &str,
    content_type: &str,
    data: Vec<u8>,
    category: FileCategory,
) -> Result<UploadedFile> {
    let extension = original_filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();

    let file_id = Uuid::new_v4();
    let safe = sanitize_filename(original_filename);
    let uuid_filename = if extension.is_empty() {
        file_id.to_string()
    } else {
        format!("{}.{}", file_id, extension)
    };
    let size_bytes = data.len() as u64;

    let (_storage_key, url) = storage
        .upload(bucket, &uuid_filename, content_type, data)
        .await
        .map_err(anyhow::Error::from)
        .context("Storage upload failed")?;

    Ok(UploadedFile {
        url,
        original_name: safe,
        size_bytes,
        category,
    })
}
