//! Shared key generation for storage backends.
//!
//! Key format: `{bucket}/{filename}`. The filename is expected to carry its
//! own collision resistance (uuid-prefixed by the upload pipeline).

/// Generate a storage key for the given bucket and filename.
///
/// All backends must use this format for consistency.
pub fn storage_key(bucket: &str, filename: &str) -> String {
    format!("{}/{}", bucket.trim_matches('/'), filename)
}

/// Reject keys that could escape the bucket namespace.
pub fn validate_key(storage_key: &str) -> bool {
    !storage_key.contains("..") && !storage_key.starts_with('/') && !storage_key.is_empty()
}
