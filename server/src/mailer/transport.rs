//! Trasporti email: log (default) e registrazione in memoria

use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug)]
pub struct MailError(pub String);

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mail delivery failed: {}", self.0)
    }
}

impl std::error::Error for MailError {}

pub trait MailTransport: Send + Sync {
    fn deliver(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Scrive le email nel log invece di spedirle
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn deliver(&self, message: &EmailMessage) -> Result<(), MailError> {
        info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "Email delivered\n{}",
            message.body
        );
        Ok(())
    }
}

/// Tiene in memoria le email consegnate; se `failing` rifiuta ogni consegna
#[derive(Default)]
pub struct RecordingTransport {
    delivered: Mutex<Vec<EmailMessage>>,
    attempts: AtomicUsize,
    failing: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Chiamate a `deliver`, riuscite o no
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<EmailMessage> {
        self.delivered
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl MailTransport for RecordingTransport {
    fn deliver(&self, message: &EmailMessage) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(MailError("transport unavailable".to_string()));
        }
        self.delivered
            .lock()
            .map_err(|_| MailError("recording transport poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}
