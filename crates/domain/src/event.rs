use crate::{
    date::{parse_timestamp, InvalidTimestampError, Timestamp},
    recurrence::{self, Recurrence},
    shared::entity::{Entity, ID},
};
use chrono::prelude::*;
use chrono_tz::Tz;

/// A scheduled event, the only entity of the system.
///
/// `start_time` and `end_time` are kept exactly as the client sent them and
/// are only parsed when a point in time is needed. `created_at` and
/// `updated_at` are owned by the store and refreshed on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub recurrence: Option<Recurrence>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Event {
    pub fn new(
        id: Option<ID>,
        title: String,
        description: String,
        start_time: String,
        end_time: String,
    ) -> Self {
        Self {
            id: id.unwrap_or_default(),
            title,
            description,
            start_time,
            end_time,
            recurrence: None,
            email: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    pub fn start(&self, tz: &Tz) -> Result<DateTime<Utc>, InvalidTimestampError> {
        parse_timestamp(&self.start_time, tz)
    }

    /// The next occurrence of this event at or after `now`, if any.
    ///
    /// A `start_time` without offset repeats at the same local time in `tz`.
    pub fn next_occurrence(
        &self,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<Option<DateTime<Utc>>, InvalidTimestampError> {
        let next = match Timestamp::parse(&self.start_time)? {
            Timestamp::Absolute(start) => recurrence::next_occurrence(start, self.recurrence, now),
            Timestamp::Local(start) => {
                recurrence::next_local_occurrence(start, self.recurrence, now, tz)
            }
        };
        Ok(next)
    }

    /// Address reminders should be delivered to. Blank addresses count as absent.
    pub fn reminder_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Case-insensitive substring match against `title` or `description`
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
