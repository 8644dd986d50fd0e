mod api;
mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod models;
mod router;
mod routes;
mod state;
mod views;

use anyhow::Context;
use api::ApiClient;
use config::Config;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("library-console starting");

    let config = Config::from_env()?;
    config.log_startup();

    let api = ApiClient::from_config(&config)?;
    let routes = routes::app_routes().context("Invalid page route table")?;

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState {
        api,
        routes: Arc::new(routes),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app::build_router(state))
        .await
        .context("HTTP server error")?;

    Ok(())
}
