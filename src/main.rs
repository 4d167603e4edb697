use clap::Parser;

use jobboard_rs::cli::{self, Cli};
use jobboard_rs::error::ErrorResponse;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_settings(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    tracing::debug!(
        application = %settings.application.name,
        version = %settings.application.version,
        "Settings loaded"
    );

    if let Err(e) = cli::execute_command(&cli, settings).await {
        tracing::debug!(error = ?e, "Command failed");
        let body = serde_json::to_string(&ErrorResponse::from(&e))?;
        eprintln!("{} {}", e.status_code().as_u16(), body);
        std::process::exit(1);
    }

    Ok(())
}
