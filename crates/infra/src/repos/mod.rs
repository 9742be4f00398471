mod event;
mod shared;

pub use event::{EventPage, IEventRepo, InMemoryEventRepo, PostgresEventRepo};
use crate::system::ISys;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
        sys: Arc<dyn ISys>,
        scan_page_size: i64,
    ) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool, sys, scan_page_size)),
        })
    }

    pub fn create_inmemory(sys: Arc<dyn ISys>, scan_page_size: i64) -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new(sys, scan_page_size)),
        }
    }
}
