use crate::shared::usecase::{execute, UseCase};
use event_scheduler_api_structs::dtos::EventDTO;
use event_scheduler_infra::SchedulerContext;
use std::path::PathBuf;

/// Writes every stored event to `path` as a pretty printed JSON array
pub async fn export_events(path: PathBuf, ctx: &SchedulerContext) -> anyhow::Result<usize> {
    execute(ExportEventsUseCase { path }, ctx)
        .await
        .map_err(|e| anyhow::Error::msg(format!("{:?}", e)))
}

#[derive(Debug)]
pub struct ExportEventsUseCase {
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(String),
    WriteError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for ExportEventsUseCase {
    /// Number of exported events
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "ExportEvents";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
        let count = events.len();

        let json = serde_json::to_string_pretty(&EventDTO::many(events))
            .map_err(|e| UseCaseError::WriteError(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| UseCaseError::WriteError(e.to_string()))?;

        Ok(count)
    }
}
