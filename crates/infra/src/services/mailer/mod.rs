mod inmemory;
mod smtp;

pub use inmemory::{InMemoryMailer, SentMail};
pub use smtp::SmtpMailer;
use tracing::info;

/// Delivers a plain text mail to a single address through a mail relay
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Used when no mail relay is configured. Mails are only written to the log.
pub struct LogMailer {}

#[async_trait::async_trait]
impl IMailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        info!(
            "No mail relay configured, skipping mail to {} with subject: {}",
            to, subject
        );
        Ok(())
    }
}
