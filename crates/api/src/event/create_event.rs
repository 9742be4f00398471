use super::fields::MandatoryFields;
use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use event_scheduler_api_structs::create_event::*;
use event_scheduler_api_structs::dtos::EventDTO;
use event_scheduler_domain::{Event, InvalidRecurrenceError, Recurrence, ID};
use event_scheduler_infra::SchedulerContext;

pub async fn create_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = CreateEventUseCase::from(body.0);

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(EventDTO::new(event)))
        .map_err(ApiError::from)
}

#[derive(Debug, Default)]
pub struct CreateEventUseCase {
    pub id: Option<ID>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub recurrence: Option<String>,
    pub email: Option<String>,
}

impl From<RequestBody> for CreateEventUseCase {
    fn from(body: RequestBody) -> Self {
        Self {
            id: body.id,
            title: body.title,
            description: body.description,
            start_time: body.start_time,
            end_time: body.end_time,
            recurrence: body.recurrence,
            email: body.email,
        }
    }
}

/// Path segments under `/events/` that are routes and cannot be used as ids
const RESERVED_IDS: [&str; 2] = ["search", "range"];

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingField(&'static str),
    InvalidId(ID),
    IdTaken(ID),
    InvalidRecurrence(InvalidRecurrenceError),
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => Self::BadClientData(format!("{} is required", field)),
            UseCaseError::InvalidRecurrence(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidId(id) => Self::BadClientData(format!(
                "The id: `{}` may only contain letters, digits, `-` and `_`, and cannot be one of {:?}",
                id, RESERVED_IDS
            )),
            UseCaseError::IdTaken(id) => {
                Self::BadClientData(format!("An event with id: {}, already exists", id))
            }
            UseCaseError::StorageError(msg) => Self::InternalError(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let fields = MandatoryFields::require(
            self.title.take(),
            self.description.take(),
            self.start_time.take(),
            self.end_time.take(),
        )
        .map_err(UseCaseError::MissingField)?;

        let recurrence = match &self.recurrence {
            Some(recurrence) => {
                Recurrence::parse_optional(recurrence).map_err(UseCaseError::InvalidRecurrence)?
            }
            None => None,
        };

        let id = self.id.take().filter(|id| !id.as_str().trim().is_empty());
        if let Some(id) = &id {
            if !id.is_path_safe() || RESERVED_IDS.contains(&id.as_str()) {
                return Err(UseCaseError::InvalidId(id.clone()));
            }
            // Creating never replaces a stored event
            match ctx.repos.events.find(id).await {
                Ok(Some(_)) => return Err(UseCaseError::IdTaken(id.clone())),
                Ok(None) => {}
                Err(e) => return Err(UseCaseError::StorageError(e.to_string())),
            }
        }
        let mut e = Event::new(
            id,
            fields.title,
            fields.description,
            fields.start_time,
            fields.end_time,
        );
        e.recurrence = recurrence;
        e.email = self.email.take();

        ctx.repos
            .events
            .put(&e)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
