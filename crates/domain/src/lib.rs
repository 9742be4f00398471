mod date;
mod event;
mod recurrence;
mod reminder;
mod shared;

pub use chrono_tz::Tz;
pub use date::{format_occurrence, parse_timestamp, InvalidTimestampError, Timestamp};
pub use event::Event;
pub use recurrence::{next_local_occurrence, next_occurrence, InvalidRecurrenceError, Recurrence};
pub use reminder::{ReminderKey, ReminderMessage};
pub use shared::entity::{Entity, ID};
