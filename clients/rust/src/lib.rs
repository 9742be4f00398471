mod base;
mod event;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use event::EventClient;
pub use event::{CreateEventInput, GetEventsInRangeInput, PatchEventInput, UpdateEventInput};
pub use event_scheduler_api_structs::dtos::*;
pub use event_scheduler_domain::{Recurrence, ID};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use event_scheduler_api_structs::dtos::EventDTO as Event;

/// Event Scheduler Server SDK
///
/// The SDK contains methods for interacting with the Event Scheduler server
/// API.
#[derive(Clone)]
pub struct EventSchedulerSDK {
    pub event: EventClient,
    pub status: StatusClient,
}

impl EventSchedulerSDK {
    /// `address` is the base of the API, e.g. `http://localhost:5000/api`
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let event = EventClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { event, status }
    }
}
