use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use event_scheduler_api_structs::dtos::EventDTO;
use event_scheduler_api_structs::get_events_in_range::*;
use event_scheduler_domain::{parse_timestamp, Event, InvalidTimestampError};
use event_scheduler_infra::SchedulerContext;

pub async fn get_events_in_range_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, ApiError> {
    let query = query_params.into_inner();
    let usecase = GetEventsInRangeUseCase {
        start: query.start,
        end: query.end,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(EventDTO::many(events)))
        .map_err(ApiError::from)
}

/// Events whose `start_time` lies within `[start, end]`
#[derive(Debug)]
pub struct GetEventsInRangeUseCase {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingBound(&'static str),
    InvalidBound(InvalidTimestampError),
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingBound(bound) => {
                Self::BadClientData(format!("Query parameter `{}` is required", bound))
            }
            UseCaseError::InvalidBound(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError(msg) => Self::InternalError(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsInRangeUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventsInRange";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.reminder_timezone;
        let start = self.start.as_deref().ok_or(UseCaseError::MissingBound("start"))?;
        let end = self.end.as_deref().ok_or(UseCaseError::MissingBound("end"))?;
        let start = parse_timestamp(start, &tz).map_err(UseCaseError::InvalidBound)?;
        let end = parse_timestamp(end, &tz).map_err(UseCaseError::InvalidBound)?;

        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        Ok(events
            .into_iter()
            .filter(|e| match e.start(&tz) {
                Ok(event_start) => event_start >= start && event_start <= end,
                Err(_) => false,
            })
            .collect())
    }
}
