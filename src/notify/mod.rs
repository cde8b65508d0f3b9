//! Email notification: digest composition and SMTP submission.
//!
//! The notifier builds one multipart message per run — an HTML table body
//! plus the CSV export as a binary attachment — and submits it over a
//! STARTTLS-upgraded, authenticated session to a single recipient. There is
//! no queuing, retry, or delivery confirmation beyond the send call's own
//! result.

mod error;
mod html;

pub use error::NotifyError;
pub use html::render_body;

use std::path::Path;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, info, instrument};

use crate::config::MailConfig;
use crate::record::MovieRecord;

/// Default SMTP session timeout (30 seconds).
pub const SMTP_TIMEOUT_SECS: u64 = 30;

/// Fallback attachment name when the path has no final component.
const FALLBACK_ATTACHMENT_NAME: &str = "attachment.csv";

/// Composes and submits the digest email for one run.
#[derive(Debug, Clone)]
pub struct Notifier {
    config: MailConfig,
}

impl Notifier {
    /// Creates a notifier from the mail configuration.
    #[must_use]
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Builds the multipart message: HTML table body plus the attachment
    /// read fully into memory, named by its file name.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if an address fails to parse, the attachment
    /// file cannot be read, or message assembly fails.
    pub async fn compose(
        &self,
        records: &[MovieRecord],
        attachment: &Path,
    ) -> Result<Message, NotifyError> {
        let from: Mailbox = self
            .config
            .sender
            .parse()
            .map_err(|e| NotifyError::address("sender", &self.config.sender, e))?;
        let to: Mailbox = self
            .config
            .recipient
            .parse()
            .map_err(|e| NotifyError::address("recipient", &self.config.recipient, e))?;

        let body = html::render_body(records);

        let bytes = tokio::fs::read(attachment)
            .await
            .map_err(|e| NotifyError::attachment(attachment, e))?;
        let filename = attachment
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_ATTACHMENT_NAME.to_string());
        debug!(filename = %filename, bytes = bytes.len(), "attachment read");
        let attachment_part = Attachment::new(filename)
            .body(bytes, ContentType::parse("application/octet-stream")?);

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.config.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .multipart(MultiPart::alternative().singlepart(SinglePart::html(body)))
                    .singlepart(attachment_part),
            )?;
        Ok(message)
    }

    /// Composes and sends the digest to the configured recipient.
    ///
    /// Opens a STARTTLS session to the relay, authenticates, submits the
    /// message, and drops the session before returning.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`compose`](Self::compose), plus
    /// [`NotifyError`] variants for relay configuration, authentication
    /// rejection, and transport failure.
    #[instrument(
        skip(self, records, attachment),
        fields(recipient = %self.config.recipient, host = %self.config.smtp_host)
    )]
    pub async fn send(
        &self,
        records: &[MovieRecord],
        attachment: &Path,
    ) -> Result<(), NotifyError> {
        let message = self.compose(records, attachment).await?;
        let transport = self.transport()?;
        transport
            .send(message)
            .await
            .map_err(|e| NotifyError::from_smtp(&self.config.smtp_host, e))?;
        info!(recipient = %self.config.recipient, "digest email sent");
        Ok(())
    }

    /// Builds the STARTTLS relay transport from the mail configuration.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );
        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
                .map_err(|e| NotifyError::relay(&self.config.smtp_host, e))?
                .port(self.config.smtp_port)
                .credentials(credentials)
                .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
                .build();
        Ok(transport)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn mail_config() -> MailConfig {
        MailConfig {
            sender: "sender@example.com".to_string(),
            recipient: "recipient@example.com".to_string(),
            subject: "Top 5 IMDb Movies".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: "sender@example.com".to_string(),
            password: "app-password".to_string(),
        }
    }

    fn sample() -> MovieRecord {
        MovieRecord {
            title: "The Shawshank Redemption".to_string(),
            year: "1994-10-14".to_string(),
            rating: "9.3".to_string(),
            link: "https://example.com/title/tt0111161/".to_string(),
        }
    }

    fn write_csv(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("top_movies.csv");
        std::fs::write(&path, "title,year,rating,link\n").unwrap();
        path
    }

    #[test]
    fn test_compose_names_attachment_by_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = write_csv(&temp_dir);
        let notifier = Notifier::new(mail_config());

        let message =
            tokio_test::block_on(notifier.compose(&[sample()], &csv_path)).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(
            formatted.contains("top_movies.csv"),
            "attachment must be named by file name, not the full path"
        );
        assert!(formatted.contains("Content-Disposition: attachment"));
        assert!(!formatted.contains(temp_dir.path().to_str().unwrap()));
    }

    #[tokio::test]
    async fn test_compose_zero_records_still_well_formed() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = write_csv(&temp_dir);
        let notifier = Notifier::new(mail_config());

        let message = notifier.compose(&[], &csv_path).await.unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(formatted.contains("Subject: Top 5 IMDb Movies"));
        assert!(formatted.contains("To: recipient@example.com"));
        assert!(formatted.contains("multipart/mixed"));
    }

    #[tokio::test]
    async fn test_compose_missing_attachment_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no_such_file.csv");
        let notifier = Notifier::new(mail_config());

        let result = notifier.compose(&[sample()], &missing).await;
        assert!(matches!(result, Err(NotifyError::Attachment { .. })));
    }

    #[tokio::test]
    async fn test_compose_invalid_recipient_is_address_error() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = write_csv(&temp_dir);
        let mut config = mail_config();
        config.recipient = "not an address".to_string();
        let notifier = Notifier::new(config);

        let result = notifier.compose(&[sample()], &csv_path).await;
        match result {
            Err(NotifyError::Address { field, .. }) => assert_eq!(field, "recipient"),
            other => panic!("Expected Address error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_connection_refused_is_transport_error() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = write_csv(&temp_dir);
        let mut config = mail_config();
        // Port 1 on loopback has nothing listening.
        config.smtp_host = "127.0.0.1".to_string();
        config.smtp_port = 1;
        let notifier = Notifier::new(config);

        let result = notifier.send(&[sample()], &csv_path).await;
        assert!(matches!(result, Err(NotifyError::Transport { .. })));
    }
}
