//! VetPath - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use vetpath_backend::{
    api::{self, middleware::cors::cors_layer, AppState},
    config::{Config, StorageBackendKind},
    db,
    error::Result,
    services::{
        career_service::CareerService,
        completion_service::{CompletionService, GeminiClient, GeminiConfig},
    },
    storage::{DocumentStore, MemoryDocumentStore, PostgresDocumentStore},
    telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    telemetry::init_tracing(&config);
    tracing::info!(config = ?config, "Starting VetPath backend");

    let store: Arc<dyn DocumentStore> = match config.storage_backend {
        StorageBackendKind::Postgres => {
            let pool = db::create_pool(&config.database_url).await?;
            tracing::info!("Connected to database");
            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");
            Arc::new(PostgresDocumentStore::new(pool))
        }
        StorageBackendKind::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let mut app_state = AppState::new(config.clone(), store);

    match GeminiConfig::from_config(&config) {
        Some(gemini) => {
            let client: Arc<dyn CompletionService> = Arc::new(GeminiClient::new(gemini)?);
            app_state.set_career_service(Arc::new(CareerService::new(Some(client))));
            tracing::info!(model = %config.gemini_model, "Career tools enabled");
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; career tools will return fallback replies");
        }
    }

    let state = Arc::new(app_state);

    let app = Router::new()
        .merge(api::routes::create_router(state))
        .layer(cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
