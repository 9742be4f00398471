use chrono::{DateTime, Utc};
use event_scheduler_domain::{Event, Recurrence, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EventDTO {
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

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            end_time: event.end_time,
            recurrence: event.recurrence,
            email: event.email,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }

    pub fn many(events: Vec<Event>) -> Vec<Self> {
        events.into_iter().map(Self::new).collect()
    }
}
