//! Quill HTTP server: route table, middleware and composition root.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use quill_db::DbManager;
use tracing::info;

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::middleware::RequestLog;
use crate::state::AppState;

/// Connect to the database, build the services and serve until shutdown.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let db = DbManager::connect(&config.db_config()).await?;
    let state = web::Data::new(AppState::new(&db, config.auth_config()));
    let slow_threshold = Duration::from_millis(config.log.slow_request_ms);

    let bind = (config.server.bind_address.clone(), config.server.port);
    info!(address = %bind.0, port = bind.1, "starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestLog::new(slow_threshold))
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
