//! SMTP delivery for submission notifications.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use galley_core::Config;

use crate::fetcher::FetchedFile;

/// Email service for submission notifications.
/// No-op if notifications are disabled or SMTP is not configured.
#[derive(Clone)]
pub struct Mailer {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Create the mailer from config. Returns `None` if notifications are
    /// disabled or SMTP is not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.notifications_enabled {
            tracing::debug!("Notifications disabled (NOTIFICATIONS_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host.as_deref()?;
        let from = config.smtp_from.clone()?;
        let port = config.smtp_port.unwrap_or(587);

        let mailer = if config.smtp_tls {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Mailer initialized (SMTP with STARTTLS)");
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Mailer initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    fn message_builder(&self, to: &[String], subject: &str) -> Result<lettre::message::MessageBuilder, String> {
        let to_addrs: Vec<Mailbox> = to.iter().filter_map(|s| s.parse().ok()).collect();
        if to_addrs.is_empty() {
            return Err("No valid recipient addresses".to_string());
        }
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let mut builder = Message::builder().from(from_addr).subject(subject);
        for mb in &to_addrs {
            builder = builder.to(mb.clone());
        }
        Ok(builder)
    }

    /// Send a plain-text email to the given recipients.
    pub async fn send(&self, to: &[String], subject: &str, body_plain: &str) -> Result<(), String> {
        if to.is_empty() {
            return Ok(());
        }
        let email = self
            .message_builder(to, subject)?
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        info!(count = to.len(), "Notification email sent");
        Ok(())
    }

    /// Send a plain-text email with the given file attachments.
    pub async fn send_with_attachments(
        &self,
        to: &[String],
        subject: &str,
        body_plain: &str,
        attachments: &[FetchedFile],
    ) -> Result<(), String> {
        if to.is_empty() {
            return Ok(());
        }

        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(body_plain.to_string()),
        );

        for file in attachments {
            let content_type = ContentType::parse(&file.content_type)
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(|e| e.to_string())?;
            multipart = multipart.singlepart(
                Attachment::new(file.name.clone()).body(file.bytes.to_vec(), content_type),
            );
        }

        let email = self
            .message_builder(to, subject)?
            .multipart(multipart)
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        info!(
            count = to.len(),
            attachments = attachments.len(),
            "Notification email with attachments sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_core::config::CategoryPolicy;
    use galley_core::{constants, StorageBackend};

    fn smtp_config(notifications_enabled: bool, host: Option<&str>) -> Config {
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
            notifications_enabled,
            smtp_host: host.map(String::from),
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: Some("press@example.org".to_string()),
            smtp_tls: false,
            editor_inbox: Some("editors@example.org".to_string()),
        }
    }

    #[test]
    fn test_from_config_none_when_disabled() {
        let config = smtp_config(false, Some("localhost"));
        assert!(Mailer::from_config(&config).is_none());
    }

    #[test]
    fn test_from_config_none_without_host() {
        let config = smtp_config(true, None);
        assert!(Mailer::from_config(&config).is_none());
    }

    #[test]
    fn test_from_config_some_with_smtp() {
        let config = smtp_config(true, Some("localhost"));
        assert!(Mailer::from_config(&config).is_some());
    }
}
