//! Spendwise REST API
//!
//! HTTP API layer for Spendwise, built with Axum.
//!
//! # Endpoints
//!
//! ## Entries
//! - `GET /expenses` - One page of entries (`page`, `limit`, `startDate`, `endDate`, `category`)
//! - `POST /add` - Create an entry (JSON or form body)
//! - `DELETE /delete/:id` - Delete an entry
//!
//! ## Totals and export
//! - `GET /summary` - Total expense, total income, net balance
//! - `GET /export` - CSV download of every entry
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## Dashboard
//! - `GET /` - Static files of the built dashboard, when `static_dir` is set
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::api::{serve, ApiConfig, AppState};
//! use spendwise::store::ExpenseStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ExpenseStore::open("expenses.db")?;
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(store, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let mut router = Router::new()
        .route("/summary", get(routes::summary::get_summary))
        .route("/expenses", get(routes::entries::list_entries))
        .route("/add", post(routes::entries::add_entry))
        .route("/delete/:id", delete(routes::entries::delete_entry))
        .route("/export", get(routes::export::export_csv))
        .nest("/health", health_routes);

    if let Some(dir) = &state.config.static_dir {
        if dir.is_dir() {
            tracing::info!(dir = ?dir, "Serving dashboard");
            router = router.fallback_service(ServeDir::new(dir));
        } else {
            tracing::warn!(dir = ?dir, "Dashboard directory not found, serving API only");
        }
    }

    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = state.config.max_body_size;
    let shared_state = Arc::new(state);

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; permissive when none are listed
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Spendwise API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Spendwise API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
