use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use event_scheduler_api_structs::dtos::EventDTO;
use event_scheduler_api_structs::search_events::*;
use event_scheduler_domain::Event;
use event_scheduler_infra::SchedulerContext;

pub async fn search_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = SearchEventsUseCase {
        query: query_params.into_inner().q,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(EventDTO::many(events)))
        .map_err(ApiError::from)
}

/// Linear scan over every stored event. There is no search index.
#[derive(Debug)]
pub struct SearchEventsUseCase {
    pub query: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingQuery,
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingQuery => {
                Self::BadClientData("Search query `q` is required".into())
            }
            UseCaseError::StorageError(msg) => Self::InternalError(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SearchEventsUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "SearchEvents";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let query = match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => query,
            _ => return Err(UseCaseError::MissingQuery),
        };

        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        Ok(events.into_iter().filter(|e| e.matches(query)).collect())
    }
}
