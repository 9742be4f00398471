mod telemetry;

use event_scheduler_api::{export_events, import_events, Application};
use event_scheduler_infra::setup_context;
use std::path::PathBuf;
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

enum Command {
    Serve,
    Import(PathBuf),
    Export(PathBuf),
}

fn parse_command() -> anyhow::Result<Command> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("import") => args
            .next()
            .map(|path| Command::Import(path.into()))
            .ok_or_else(|| anyhow::Error::msg("Usage: event_scheduler import <path>")),
        Some("export") => args
            .next()
            .map(|path| Command::Export(path.into()))
            .ok_or_else(|| anyhow::Error::msg("Usage: event_scheduler export <path>")),
        _ => Ok(Command::Serve),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber("event_scheduler".into(), "info".into());
    init_subscriber(subscriber);

    let command = parse_command()?;
    let context = setup_context().await;

    match command {
        Command::Serve => {
            let app = Application::new(context).await?;
            info!("Listening on port {}", app.port());
            app.start().await?;
        }
        Command::Import(path) => {
            let summary = import_events(path, &context).await?;
            info!(
                "Imported {} event(s), {} failed",
                summary.imported, summary.failed
            );
        }
        Command::Export(path) => {
            let count = export_events(path.clone(), &context).await?;
            info!("Exported {} event(s) to {}", count, path.display());
        }
    }

    Ok(())
}
