//! Error types for the email notification stage.

use std::path::PathBuf;

use lettre::address::AddressError;
use lettre::message::header::ContentTypeErr;
use lettre::transport::smtp;
use thiserror::Error;

/// Errors that can occur while composing or submitting the digest email.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A sender or recipient address failed to parse.
    #[error("invalid {field} address '{value}': {source}")]
    Address {
        /// Which address field was invalid ("sender" or "recipient").
        field: &'static str,
        /// The rejected address text.
        value: String,
        /// The underlying parse error.
        #[source]
        source: AddressError,
    },

    /// The attachment file could not be read.
    #[error("cannot read attachment {path}: {source}")]
    Attachment {
        /// The attachment path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Message assembly failed.
    #[error("failed to assemble message: {source}")]
    Compose {
        #[from]
        source: lettre::error::Error,
    },

    /// The attachment content type is not a valid MIME type.
    #[error("invalid attachment content type: {source}")]
    ContentType {
        #[from]
        source: ContentTypeErr,
    },

    /// The relay connection could not be configured (TLS parameters).
    #[error("cannot configure relay {host}: {source}")]
    Relay {
        /// The relay host.
        host: String,
        /// The underlying SMTP error.
        #[source]
        source: smtp::Error,
    },

    /// The relay rejected the configured credentials.
    #[error("authentication rejected by {host}: {source}")]
    Auth {
        /// The relay host.
        host: String,
        /// The underlying SMTP error.
        #[source]
        source: smtp::Error,
    },

    /// SMTP session or transmission failure.
    #[error("SMTP transport error via {host}: {source}")]
    Transport {
        /// The relay host.
        host: String,
        /// The underlying SMTP error.
        #[source]
        source: smtp::Error,
    },
}

impl NotifyError {
    /// Creates an address error for the named field.
    pub fn address(field: &'static str, value: impl Into<String>, source: AddressError) -> Self {
        Self::Address {
            field,
            value: value.into(),
            source,
        }
    }

    /// Creates an attachment read error.
    pub fn attachment(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Attachment {
            path: path.into(),
            source,
        }
    }

    /// Creates a relay configuration error.
    pub fn relay(host: impl Into<String>, source: smtp::Error) -> Self {
        Self::Relay {
            host: host.into(),
            source,
        }
    }

    /// Classifies an SMTP submission error as auth rejection or transport
    /// failure.
    ///
    /// Permanent 53x replies are authentication failures (535 bad
    /// credentials, 530 auth required, 534 mechanism rejected); everything
    /// else is transport.
    pub(crate) fn from_smtp(host: &str, source: smtp::Error) -> Self {
        let is_auth = source
            .status()
            .map(|code| code.to_string())
            .is_some_and(|code| matches!(code.as_str(), "530" | "534" | "535" | "538"));
        if is_auth {
            Self::Auth {
                host: host.to_string(),
                source,
            }
        } else {
            Self::Transport {
                host: host.to_string(),
                source,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_error_address_display() {
        let source = "not an address".parse::<lettre::message::Mailbox>().unwrap_err();
        let error = NotifyError::address("recipient", "not an address", source);
        let msg = error.to_string();
        assert!(msg.contains("recipient"), "Expected field name in: {msg}");
        assert!(msg.contains("not an address"), "Expected value in: {msg}");
    }

    #[test]
    fn test_notify_error_attachment_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = NotifyError::attachment(PathBuf::from("/tmp/missing.csv"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/missing.csv"), "Expected path in: {msg}");
    }
}
