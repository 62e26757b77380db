//! Configuration module
//!
//! Env-var driven configuration for the service: storage backend selection,
//! per-category upload policies, attachment packaging limits, and SMTP
//! settings for outbound notifications.

use std::env;
use std::str::FromStr;

use crate::constants;
use crate::models::FileCategory;
use crate::storage_types::StorageBackend;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
}

/// Upload policy for one file category.
#[derive(Clone, Debug)]
pub struct CategoryPolicy {
    /// Destination bucket. Opaque configuration string.
    pub bucket: String,
    /// Allowed file extensions (without leading dot, lowercase).
    pub allowed_extensions: Vec<String>,
    /// Allowed content types (lowercase).
    pub allowed_content_types: Vec<String>,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CategoryPolicy {
    pub fn default_documents() -> Self {
        CategoryPolicy {
            bucket: constants::DEFAULT_DOCUMENT_BUCKET.to_string(),
            allowed_extensions: strings(&["pdf", "doc", "docx"]),
            allowed_content_types: strings(&[
                "application/pdf",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ]),
            max_file_size_bytes: 10 * 1024 * 1024,
            max_files: 5,
        }
    }

    pub fn default_images() -> Self {
        CategoryPolicy {
            bucket: constants::DEFAULT_IMAGE_BUCKET.to_string(),
            allowed_extensions: strings(&["jpg", "jpeg", "png", "webp"]),
            allowed_content_types: strings(&[
                "image/jpeg",
                "image/png",
                "image/webp",
            ]),
            max_file_size_bytes: 5 * 1024 * 1024,
            max_files: 10,
        }
    }

    pub fn default_covers() -> Self {
        CategoryPolicy {
            max_files: 1,
            bucket: constants::DEFAULT_COVER_BUCKET.to_string(),
            ..Self::default_images()
        }
    }
}

/// Application configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, ...)
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload policies
    pub documents: CategoryPolicy,
    pub images: CategoryPolicy,
    pub covers: CategoryPolicy,
    // Attachment packaging
    pub attachment_budget_bytes: u64,
    pub attachment_fetch_timeout_secs: u64,
    // Outbound notifications
    pub notifications_enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    /// Editorial inbox that receives submission notifications.
    pub editor_inbox: Option<String>,
}

fn var_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_parse<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match var_opt(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var: name,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn var_bool(name: &'static str, default: bool) -> bool {
    var_opt(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

/// Apply `{PREFIX}_BUCKET`, `{PREFIX}_MAX_FILE_SIZE_MB` and
/// `{PREFIX}_MAX_FILES` overrides to a default policy.
fn policy_from_env(prefix: &str, mut policy: CategoryPolicy) -> CategoryPolicy {
    if let Some(bucket) = var_opt(&format!("{}_BUCKET", prefix)) {
        policy.bucket = bucket;
    }
    if let Some(mb) = var_opt(&format!("{}_MAX_FILE_SIZE_MB", prefix))
        .and_then(|v| v.parse::<u64>().ok())
    {
        policy.max_file_size_bytes = mb * 1024 * 1024;
    }
    if let Some(count) = var_opt(&format!("{}_MAX_FILES", prefix))
        .and_then(|v| v.parse::<usize>().ok())
    {
        policy.max_files = count;
    }
    policy
}

impl Config {
    /// Load configuration from the environment (`.env` is honored).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let storage_backend = match var_opt("STORAGE_BACKEND") {
            Some(raw) => {
                raw.parse()
                    .map_err(|message| ConfigError::InvalidVar {
                        var: "STORAGE_BACKEND",
                        message,
                    })?
            }
            None => StorageBackend::Local,
        };

        let attachment_budget_bytes = var_opt("ATTACHMENT_BUDGET_MB")
            .and_then(|v| v.parse::<u64>().ok())
            .map(|mb| mb * 1024 * 1024)
            .unwrap_or(constants::ATTACHMENT_BUDGET_BYTES);

        Ok(Config {
            server_port: var_parse("GALLEY_PORT", 3000)?,
            environment: var_opt("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            storage_backend,
            s3_bucket: var_opt("S3_BUCKET"),
            s3_region: var_opt("S3_REGION").or_else(|| var_opt("AWS_REGION")),
            s3_endpoint: var_opt("S3_ENDPOINT"),
            local_storage_path: var_opt("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var_opt("LOCAL_STORAGE_BASE_URL"),
            documents: policy_from_env("DOCUMENT", CategoryPolicy::default_documents()),
            images: policy_from_env("IMAGE", CategoryPolicy::default_images()),
            covers: policy_from_env("COVER", CategoryPolicy::default_covers()),
            attachment_budget_bytes,
            attachment_fetch_timeout_secs: var_parse(
                "ATTACHMENT_FETCH_TIMEOUT_SECS",
                constants::ATTACHMENT_FETCH_TIMEOUT_SECS,
            )?,
            notifications_enabled: var_bool("NOTIFICATIONS_ENABLED", true),
            smtp_host: var_opt("SMTP_HOST"),
            smtp_port: var_opt("SMTP_PORT").and_then(|v| v.parse().ok()),
            smtp_user: var_opt("SMTP_USER"),
            smtp_password: var_opt("SMTP_PASSWORD"),
            smtp_from: var_opt("SMTP_FROM"),
            smtp_tls: var_bool("SMTP_TLS", true),
            editor_inbox: var_opt("EDITOR_INBOX"),
        })
    }

    /// Fail-fast startup validation of backend-specific requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(ConfigError::MissingVar("S3_BUCKET"));
                }
                if self.s3_region.is_none() {
                    return Err(ConfigError::MissingVar("S3_REGION"));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(ConfigError::MissingVar("LOCAL_STORAGE_PATH"));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(ConfigError::MissingVar("LOCAL_STORAGE_BASE_URL"));
                }
            }
        }
        if self.notifications_enabled && self.smtp_host.is_some() && self.smtp_from.is_none() {
            return Err(ConfigError::MissingVar("SMTP_FROM"));
        }
        Ok(())
    }

    pub fn policy(&self, category: FileCategory) -> &CategoryPolicy {
        match category {
            FileCategory::Document => &self.documents,
            FileCategory::Image => &self.images,
            FileCategory::Cover => &self.covers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> Config {
        Config {
            server_port: 3000,
            environment: "test".to_string(),
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some("/tmp/galley".to_string()),
            local_storage_base_url: Some("http://localhost:3000/files".to_string()),
            documents: CategoryPolicy::default_documents(),
            images: CategoryPolicy::default_images(),
            covers: CategoryPolicy::default_covers(),
            attachment_budget_bytes: constants::ATTACHMENT_BUDGET_BYTES,
            attachment_fetch_timeout_secs: constants::ATTACHMENT_FETCH_TIMEOUT_SECS,
            notifications_enabled: false,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            editor_inbox: None,
        }
    }

    #[test]
    fn test_default_policies() {
        let config = local_config();
        assert_eq!(config.policy(FileCategory::Document).max_files, 5);
        assert_eq!(config.policy(FileCategory::Image).max_files, 10);
        assert_eq!(config.policy(FileCategory::Cover).max_files, 1);
        assert_eq!(
            config.policy(FileCategory::Document).max_file_size_bytes,
            10 * 1024 * 1024
        );
        assert!(config
            .policy(FileCategory::Cover)
            .allowed_extensions
            .contains(&"png".to_string()));
    }

    #[test]
    fn test_validate_local_requires_path_and_url() {
        let mut config = local_config();
        assert!(config.validate().is_ok());

        config.local_storage_path = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingVar("LOCAL_STORAGE_PATH"))
        ));
    }

    #[test]
    fn test_validate_s3_requires_bucket_and_region() {
        let mut config = local_config();
        config.storage_backend = StorageBackend::S3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingVar("S3_BUCKET"))
        ));

        config.s3_bucket = Some("galley-media".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingVar("S3_REGION"))
        ));

        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }
}
