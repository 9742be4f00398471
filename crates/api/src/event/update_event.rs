use super::fields::MandatoryFields;
use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use event_scheduler_api_structs::dtos::EventDTO;
use event_scheduler_api_structs::{patch_event, update_event};
use event_scheduler_domain::{Event, InvalidRecurrenceError, Recurrence, ID};
use event_scheduler_infra::SchedulerContext;

pub async fn update_event_controller(
    path_params: web::Path<update_event::PathParams>,
    body: web::Json<update_event::RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.into_inner().event_id,
        title: body.title,
        description: body.description,
        start_time: body.start_time,
        end_time: body.end_time,
        recurrence: body.recurrence,
        email: body.email,
        partial: false,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(EventDTO::new(event)))
        .map_err(ApiError::from)
}

pub async fn patch_event_controller(
    path_params: web::Path<patch_event::PathParams>,
    body: web::Json<patch_event::RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.into_inner().event_id,
        title: body.title,
        description: body.description,
        start_time: body.start_time,
        end_time: body.end_time,
        recurrence: body.recurrence.map(Some),
        email: body.email.map(Some),
        partial: true,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(EventDTO::new(event)))
        .map_err(ApiError::from)
}

/// Writes new values onto a stored event.
///
/// A full update (`partial == false`) needs all four mandatory fields. In
/// both modes `None` leaves the stored value untouched and `Some(None)`
/// clears an optional field.
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub recurrence: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub partial: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingField(&'static str),
    InvalidRecurrence(InvalidRecurrenceError),
    NotFound(ID),
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => Self::BadClientData(format!("{} is required", field)),
            UseCaseError::InvalidRecurrence(e) => Self::BadClientData(e.to_string()),
            UseCaseError::NotFound(_) => Self::NotFound("Event not found".into()),
            UseCaseError::StorageError(msg) => Self::InternalError(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        if !self.partial {
            let fields = MandatoryFields::require(
                self.title.take(),
                self.description.take(),
                self.start_time.take(),
                self.end_time.take(),
            )
            .map_err(UseCaseError::MissingField)?;
            self.title = Some(fields.title);
            self.description = Some(fields.description);
            self.start_time = Some(fields.start_time);
            self.end_time = Some(fields.end_time);
        }

        let recurrence = match &self.recurrence {
            Some(Some(recurrence)) => Some(
                Recurrence::parse_optional(recurrence).map_err(UseCaseError::InvalidRecurrence)?,
            ),
            Some(None) => Some(None),
            None => None,
        };

        let mut e = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(e) => return Err(UseCaseError::StorageError(e.to_string())),
        };

        if let Some(title) = self.title.take() {
            e.title = title;
        }
        if let Some(description) = self.description.take() {
            e.description = description;
        }
        if let Some(start_time) = self.start_time.take() {
            e.start_time = start_time;
        }
        if let Some(end_time) = self.end_time.take() {
            e.end_time = end_time;
        }
        if let Some(recurrence) = recurrence {
            e.recurrence = recurrence;
        }
        if let Some(email) = self.email.take() {
            e.email = email;
        }

        ctx.repos
            .events
            .put(&e)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
