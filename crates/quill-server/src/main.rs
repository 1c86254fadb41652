//! Quill server entry point.

use std::process::ExitCode;

use quill_server::config::AppConfig;
use quill_server::error::StartupError;

async fn start() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    quill_server::logging::init(config.log.format)?;
    tracing::info!("starting quill server");
    quill_server::run(config).await
}

#[actix_web::main]
async fn main() -> ExitCode {
    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("quill-server: {e}");
            ExitCode::FAILURE
        }
    }
}
