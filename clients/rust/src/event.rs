use crate::base::path_segment;
use crate::{APIResponse, BaseClient};
use event_scheduler_api_structs::*;
use event_scheduler_domain::{Recurrence, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateEventInput {
    /// Generated by the server when not given
    pub id: Option<ID>,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub recurrence: Option<Recurrence>,
    pub email: Option<String>,
}

/// Replaces the mandatory fields of an event. For `recurrence` and `email`
/// `None` keeps the stored value and `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventInput {
    pub event_id: ID,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub recurrence: Option<Option<Recurrence>>,
    pub email: Option<Option<String>>,
}

/// Only the fields that are `Some` are changed
#[derive(Debug, Clone, Default)]
pub struct PatchEventInput {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub email: Option<String>,
}

pub struct GetEventsInRangeInput {
    pub start: String,
    pub end: String,
}

fn event_path(event_id: &ID) -> String {
    format!("events/{}", path_segment(event_id.as_str()))
}

impl EventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        let body = create_event::RequestBody {
            id: input.id,
            title: Some(input.title),
            description: Some(input.description),
            start_time: Some(input.start_time),
            end_time: Some(input.end_time),
            recurrence: input.recurrence.map(|r| r.to_string()),
            email: input.email,
        };

        self.base
            .post(body, "events/".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(event_path(&event_id), StatusCode::OK)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_events::APIResponse> {
        self.base.get("events/".into(), StatusCode::OK).await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        let event_id = input.event_id.clone();
        let body = update_event::RequestBody {
            title: Some(input.title),
            description: Some(input.description),
            start_time: Some(input.start_time),
            end_time: Some(input.end_time),
            recurrence: input
                .recurrence
                .map(|recurrence| recurrence.map(|r| r.to_string())),
            email: input.email,
        };

        self.base
            .put(body, event_path(&event_id), StatusCode::OK)
            .await
    }

    pub async fn patch(&self, input: PatchEventInput) -> APIResponse<patch_event::APIResponse> {
        let event_id = input.event_id.clone();
        let body = patch_event::RequestBody {
            title: input.title,
            description: input.description,
            start_time: input.start_time,
            end_time: input.end_time,
            recurrence: input.recurrence.map(|r| r.to_string()),
            email: input.email,
        };

        self.base
            .patch(body, event_path(&event_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(event_path(&event_id), StatusCode::OK)
            .await
    }

    pub async fn search(&self, query: &str) -> APIResponse<search_events::APIResponse> {
        let query = search_events::QueryParams {
            q: Some(query.to_string()),
        };
        self.base
            .get_with_query(&query, "events/search".into(), StatusCode::OK)
            .await
    }

    pub async fn get_in_range(
        &self,
        input: GetEventsInRangeInput,
    ) -> APIResponse<get_events_in_range::APIResponse> {
        let query = get_events_in_range::QueryParams {
            start: Some(input.start),
            end: Some(input.end),
        };
        self.base
            .get_with_query(&query, "events/range".into(), StatusCode::OK)
            .await
    }
}
