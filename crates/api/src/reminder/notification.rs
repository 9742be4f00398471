use event_scheduler_domain::ReminderMessage;
use event_scheduler_infra::IMailer;
use tracing::{error, info};

/// Delivers a reminder mail. Failures are logged and reported through the
/// return value, never raised, so one failed delivery cannot abort a
/// reminder cycle.
pub async fn send_reminder(mailer: &dyn IMailer, msg: &ReminderMessage) -> bool {
    match mailer.send(&msg.to, &msg.subject, &msg.body).await {
        Ok(()) => {
            info!("Reminder mail sent to {}", msg.to);
            true
        }
        Err(e) => {
            error!("Unable to send reminder mail to {}: {:?}", msg.to, e);
            false
        }
    }
}
