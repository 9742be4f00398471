mod mailer;

pub use mailer::{IMailer, InMemoryMailer, LogMailer, SentMail, SmtpMailer};
