//! Spendwise API Server
//!
//! Run with: cargo run --bin spendwise-api
//!
//! # Configuration
//!
//! Settings come from `config.toml` (see `spendwise config`), overridden by:
//! - `SPENDWISE_HOST`: Host to bind to (default: 127.0.0.1)
//! - `SPENDWISE_PORT`: Port to listen on (default: 5000)
//! - `SPENDWISE_DATABASE`: SQLite file (default: <data dir>/spendwise/expenses.db)
//! - `SPENDWISE_STATIC_DIR`: Built dashboard to serve at `/`
//! - `SPENDWISE_LOG_LEVEL` / `SPENDWISE_LOG_FORMAT`: Logging (pretty or json)
//! - `RUST_LOG`: Log filter, wins over the configured level

use spendwise::api::{serve, AppState};
use spendwise::config::{Config, LoggingConfig};
use spendwise::store::ExpenseStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load_with_env(std::path::Path::new(&path))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting Spendwise API server v{}", env!("CARGO_PKG_VERSION"));

    let db_path = config.server.database_file();
    tracing::info!("Database: {:?}", db_path);
    let store = ExpenseStore::open(&db_path)?;
    tracing::info!("Expense store opened with {} entries", store.count()?);

    let api_config = config.server.api_config();
    let state = AppState::new(store, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Spendwise API server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("spendwise={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
