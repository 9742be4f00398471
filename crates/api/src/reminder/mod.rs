mod notification;
mod scheduler;

pub use notification::send_reminder;
pub use scheduler::{FiredReminder, ReminderScheduler};
