use super::create_event::CreateEventUseCase;
use crate::shared::usecase::{execute, UseCase};
use event_scheduler_api_structs::create_event::RequestBody;
use event_scheduler_infra::SchedulerContext;
use std::path::PathBuf;
use tracing::{error, info};

/// Creates every event of the JSON array stored at `path`.
///
/// Each record goes through the same validation as a created event. Records
/// that fail are logged and counted, the rest are still imported.
pub async fn import_events(
    path: PathBuf,
    ctx: &SchedulerContext,
) -> anyhow::Result<ImportSummary> {
    execute(ImportEventsUseCase { path }, ctx)
        .await
        .map_err(|e| anyhow::Error::msg(format!("{:?}", e)))
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub struct ImportEventsUseCase {
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum UseCaseError {
    ReadError(String),
    InvalidFile(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for ImportEventsUseCase {
    type Response = ImportSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ImportEvents";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| UseCaseError::ReadError(e.to_string()))?;
        let records: Vec<RequestBody> = serde_json::from_str(&content)
            .map_err(|e| UseCaseError::InvalidFile(e.to_string()))?;

        let mut summary = ImportSummary::default();
        for (index, record) in records.into_iter().enumerate() {
            let mut usecase = CreateEventUseCase::from(record);
            match usecase.execute(ctx).await {
                Ok(event) => {
                    info!("Imported event {} ({})", event.id, event.title);
                    summary.imported += 1;
                }
                Err(e) => {
                    error!("Unable to import record #{}: {:?}", index, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
