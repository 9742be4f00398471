use crate::{date::format_occurrence, event::Event, shared::entity::ID};
use chrono::prelude::*;
use chrono_tz::Tz;

/// Identity of a single reminder: one occurrence of one `Event`.
///
/// Used to avoid sending more than one reminder for the same occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderKey {
    pub event_id: ID,
    pub occurrence: DateTime<Utc>,
}

impl ReminderKey {
    pub fn new(event: &Event, occurrence: DateTime<Utc>) -> Self {
        Self {
            event_id: event.id.clone(),
            occurrence,
        }
    }
}

/// The mail sent to the `Event` owner ahead of an occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ReminderMessage {
    pub fn new(to: &str, event: &Event, occurrence: &DateTime<Utc>, tz: &Tz) -> Self {
        let subject = format!("Reminder: {} is starting soon", event.title);
        let body = format!(
            "⏰ Event: {}\n📅 Time: {}\n📝 Description: {}",
            event.title,
            format_occurrence(occurrence, tz),
            event.description
        );

        Self {
            to: to.to_string(),
            subject,
            body,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_the_reminder_template() {
        let event = Event::new(
            None,
            "Team Meeting".into(),
            "Weekly sync".into(),
            "2024-01-15T10:00:00".into(),
            "2024-01-15T11:00:00".into(),
        );
        let occurrence = Utc.with_ymd_and_hms(2024, 1, 22, 10, 0, 0).unwrap();
        let msg = ReminderMessage::new("test@example.com", &event, &occurrence, &Tz::UTC);

        assert_eq!(msg.to, "test@example.com");
        assert_eq!(msg.subject, "Reminder: Team Meeting is starting soon");
        assert_eq!(
            msg.body,
            "⏰ Event: Team Meeting\n📅 Time: 2024-01-22 10:00\n📝 Description: Weekly sync"
        );
    }

    #[test]
    fn keys_differ_per_occurrence() {
        let event = Event::new(
            None,
            "a".into(),
            "b".into(),
            "2024-01-15T10:00:00".into(),
            "2024-01-15T11:00:00".into(),
        );
        let first = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 16, 10, 0, 0).unwrap();

        assert_eq!(ReminderKey::new(&event, first), ReminderKey::new(&event, first));
        assert_ne!(ReminderKey::new(&event, first), ReminderKey::new(&event, second));
    }
}
