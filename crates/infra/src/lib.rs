mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use repos::{EventPage, IEventRepo, InMemoryEventRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{error, info};

#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl SchedulerContext {
    /// Context backed by the in-memory event store. Mails are only logged.
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        Self {
            repos: Repos::create_inmemory(sys.clone(), config.scan_page_size),
            mailer: Arc::new(LogMailer {}),
            config,
            sys,
        }
    }

    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let repos = Repos::create_postgres(
            &params.postgres_connection_string,
            sys.clone(),
            config.scan_page_size,
        )
        .await
        .expect("Postgres credentials must be set and valid");
        let mailer = create_mailer(&config);

        Self {
            repos,
            config,
            sys,
            mailer,
        }
    }
}

fn create_mailer(config: &Config) -> Arc<dyn IMailer> {
    match &config.smtp {
        Some(smtp) => match SmtpMailer::new(smtp, config.email_timeout) {
            Ok(mailer) => {
                info!("Reminder emails will be sent through {}:{}", smtp.host, smtp.port);
                Arc::new(mailer)
            }
            Err(e) => {
                error!(
                    "Invalid mail relay configuration, reminder emails will only be logged: {:?}",
                    e
                );
                Arc::new(LogMailer {})
            }
        },
        None => Arc::new(LogMailer {}),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> SchedulerContext {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    // cargo run inmemory
    let inmemory_arg_set = std::env::args().nth(1).map_or(false, |arg| arg == "inmemory");
    if inmemory_arg_set {
        info!("Inmemory argument provided. Going to use inmemory infra.");
        let mut ctx = SchedulerContext::create_inmemory();
        ctx.mailer = create_mailer(&ctx.config);
        return ctx;
    }

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(postgres_connection_string) => {
            info!(
                "{} env var was provided. Going to use postgres.",
                PSQL_CONNECTION_STRING
            );
            SchedulerContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        Err(_) => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            let mut ctx = SchedulerContext::create_inmemory();
            ctx.mailer = create_mailer(&ctx.config);
            ctx
        }
    }
}
