use std::sync::Arc;

use anyhow::Context;
use axum::{Router, middleware, routing::get};
use swot_api::{
    ApiConfig, ApiState,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{cors::create_cors_layer, request_id::request_id_middleware},
    tracing::init_tracing,
};
use swot_db::{DocumentStore, MemoryStore};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("invalid configuration")?;

    init_tracing(&config.environment);
    let metrics_handle = init_metrics()?;

    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(database_url) => {
            let store = swot_db::connect(database_url, config.database_max_connections).await?;
            tracing::info!("Connected to database");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, keeping all data in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let state = ApiState::new(&config, store)?;

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = swot_api::router::router()
        .with_state(state)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(config.parsed_allowed_origins()))
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
