use event_scheduler_api::Application;
use event_scheduler_infra::{Config, IMailer, InMemoryMailer, SchedulerContext};
use event_scheduler_sdk::EventSchedulerSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    pub mailer: Arc<InMemoryMailer>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, EventSchedulerSDK, String) {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.reminder_check_interval = std::time::Duration::from_millis(50);
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone() as Arc<dyn IMailer>;

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, mailer };
    let sdk = EventSchedulerSDK::new(address.clone());
    (app, sdk, address)
}
