mod error;
mod event;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use error::ApiError;
pub use event::{export_events, import_events, ImportSummary};
pub use job_schedulers::{start_reminder_job, ReminderJobHandle};
pub use reminder::{FiredReminder, ReminderScheduler};
use event_scheduler_infra::SchedulerContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    status::configure_routes(cfg);
}

/// Malformed JSON bodies are client errors reported in the same shape as
/// every other error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadClientData(err.to_string()).into())
}

pub struct Application {
    server: Server,
    port: u16,
    reminder_job: ReminderJobHandle,
}

impl Application {
    pub async fn new(context: SchedulerContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let reminder_job = Application::start_job_schedulers(context);

        Ok(Self {
            server,
            port,
            reminder_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: SchedulerContext) -> ReminderJobHandle {
        start_reminder_job(context)
    }

    async fn configure_server(context: SchedulerContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(json_config())
                .service(web::scope("/api").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Serves until the server shuts down, then stops the reminder job
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.reminder_job.stop().await;
        res
    }
}
