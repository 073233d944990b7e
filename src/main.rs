// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::display_case_service::DisplayCaseService;
use crate::application::planning_service::PlanningService;
use crate::domain::product::default_catalog;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_planning_repository::HttpPlanningRepository;
use crate::infrastructure::json_file_store::JsonFileStore;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bakery_planner=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create adapters (infrastructure layer)
    let repository = Arc::new(HttpPlanningRepository::new(
        config.upstream.base_url.clone(),
        Duration::from_millis(config.upstream.timeout_ms),
    )?);
    let store = Arc::new(JsonFileStore::new(config.display_case.storage_path.clone()));
    tracing::info!("Display grids are stored in {}", store.path().display());

    // Create services (application layer)
    let planning_service = PlanningService::new(repository);
    let display_case_service =
        DisplayCaseService::initialize(&config.display_case, default_catalog(), store).await;

    let state = Arc::new(AppState {
        planning_service,
        display_case_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting bakery-planner on {} (upstream {})",
        addr,
        config.upstream.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
