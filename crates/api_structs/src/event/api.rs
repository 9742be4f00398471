use crate::dtos::EventDTO;
use event_scheduler_domain::{Event, ID};
use serde::{Deserialize, Deserializer, Serialize};

pub type EventResponse = EventDTO;

pub type EventListResponse = Vec<EventDTO>;

/// Tells an absent key apart from an explicit `null`: absent stays `None`,
/// `null` becomes `Some(None)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub mod get_events {
    use super::*;

    pub type APIResponse = EventListResponse;
}

pub mod create_event {
    use super::*;

    /// Mandatory fields are optional here so that a missing one can be
    /// reported by name
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RequestBody {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<ID>,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub start_time: Option<String>,
        #[serde(default)]
        pub end_time: Option<String>,
        #[serde(default)]
        pub recurrence: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
    }

    impl From<Event> for RequestBody {
        fn from(e: Event) -> Self {
            Self {
                id: Some(e.id),
                title: Some(e.title),
                description: Some(e.description),
                start_time: Some(e.start_time),
                end_time: Some(e.end_time),
                recurrence: e.recurrence.map(|r| r.to_string()),
                email: e.email,
            }
        }
    }

    pub type APIResponse = EventResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    /// Body of a full update.
    ///
    /// For `recurrence` and `email` an absent key keeps the stored value
    /// while an explicit `null` clears it.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub start_time: Option<String>,
        #[serde(default)]
        pub end_time: Option<String>,
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub recurrence: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub email: Option<Option<String>>,
    }

    pub type APIResponse = EventResponse;
}

pub mod patch_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    /// Body of a partial update. Only keys with non-null values are applied.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RequestBody {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub start_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub end_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub recurrence: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
    }

    pub type APIResponse = EventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub message: String,
    }

    impl APIResponse {
        pub fn deleted() -> Self {
            Self {
                message: "Event deleted".into(),
            }
        }
    }
}

pub mod search_events {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub q: Option<String>,
    }

    pub type APIResponse = EventListResponse;
}

pub mod get_events_in_range {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub start: Option<String>,
        pub end: Option<String>,
    }

    pub type APIResponse = EventListResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_update_tells_null_apart_from_absent() {
        let body: update_event::RequestBody =
            serde_json::from_str(r#"{"title": "X", "email": null}"#).unwrap();
        assert_eq!(body.title, Some("X".into()));
        assert_eq!(body.email, Some(None));
        assert_eq!(body.recurrence, None);

        let body: update_event::RequestBody =
            serde_json::from_str(r#"{"recurrence": "daily"}"#).unwrap();
        assert_eq!(body.recurrence, Some(Some("daily".into())));
    }

    #[test]
    fn partial_update_ignores_null() {
        let body: patch_event::RequestBody =
            serde_json::from_str(r#"{"title": "X", "email": null}"#).unwrap();
        assert_eq!(body.title, Some("X".into()));
        assert_eq!(body.email, None);
    }
}
