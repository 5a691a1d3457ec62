use axum::{Router, extract::DefaultBodyLimit, routing::get};
use configuration::Settings;
use database::{CustomerStore, DbRepository, InMemoryStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }
}

/// Builds the customer API router over the given store.
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    // The UI may be served from a different origin than the API.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/customer",
            get(handlers::list_customers)
                .post(handlers::create_customer)
                .put(handlers::update_customer)
                .patch(handlers::update_customer),
        )
        .route(
            "/customer/:id",
            get(handlers::get_customer).delete(handlers::delete_customer),
        )
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// Connects the store, binds the listener and serves until Ctrl-C.
///
/// With `in_memory` set no database is contacted and records live only as long as
/// the process. Otherwise the PostgreSQL pool is migrated on startup and closed
/// after the server has drained.
pub async fn run_server(settings: Settings, in_memory: bool) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_repo = if in_memory {
        tracing::warn!("Using the in-memory store; records will not survive a restart.");
        None
    } else {
        let pool = database::connect(&settings.database).await?;
        database::run_migrations(&pool).await?;
        Some(DbRepository::new(pool))
    };
    let store: Arc<dyn CustomerStore> = match &db_repo {
        Some(repo) => Arc::new(repo.clone()),
        None => Arc::new(InMemoryStore::new()),
    };

    let app = build_router(AppState::new(store), settings.server.body_limit_bytes);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(repo) = db_repo {
        repo.close().await;
        tracing::info!("Database pool closed.");
    }
    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections.");
}
