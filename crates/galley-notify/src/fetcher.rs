//! Attachment fetching.
//!
//! The packager resolves URLs through the [`FileFetcher`] trait so the
//! budget logic stays independent of the transport and tests can substitute
//! scripted fetches. The HTTP implementation applies a per-request timeout;
//! a timed-out fetch is indistinguishable from a failed one.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// A successfully fetched attachment.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub url: String,
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FetchedFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Timed out")]
    Timeout,
}

#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError>;
}

/// Display name for an attachment, derived from the last URL path segment.
pub fn file_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && !s.contains(':'))
        .unwrap_or("attachment")
        .to_string()
}

/// HTTP fetcher with a per-file timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl FileFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        Ok(FetchedFile {
            url: url.to_string(),
            name: file_name_from_url(url),
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://cdn.example.org/article-documents/a.pdf"),
            "a.pdf"
        );
        assert_eq!(
            file_name_from_url("https://cdn.example.org/article-documents/a.pdf/"),
            "a.pdf"
        );
        assert_eq!(file_name_from_url("https://"), "attachment");
    }
}
