use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use event_scheduler_api_structs::dtos::EventDTO;
use event_scheduler_domain::Event;
use event_scheduler_infra::SchedulerContext;

pub async fn get_events_controller(
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, ApiError> {
    execute(GetEventsUseCase {}, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(EventDTO::many(events)))
        .map_err(ApiError::from)
}

/// Every stored event ordered by `start_time`
#[derive(Debug)]
pub struct GetEventsUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(msg) => Self::InternalError(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .events
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
