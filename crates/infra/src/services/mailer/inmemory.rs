use super::IMailer;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every mail in memory instead of sending it. Can be told to fail
/// in order to exercise delivery errors.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: bool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Default::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow::Error::msg(format!("Unable to deliver mail to {}", to)));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| anyhow::Error::msg("In-memory mailer lock was poisoned"))?;
        sent.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
