//! # Spendwise
//!
//! Personal expense tracker - a SQLite-backed HTTP API plus the view
//! controller that drives the dashboard: summary totals, paginated entries,
//! new-entry submission, date/category filters and CSV export.
//!
//! ## Modules
//!
//! - [`model`]: Entries, totals, filters and form data
//! - [`format`]: Currency and entry-row formatting
//! - [`store`]: SQLite expense store
//! - [`api`]: REST API server with Axum
//! - [`client`]: HTTP client for the API
//! - [`controller`]: View controller over an explicit entry list model
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spendwise::client::{ClientConfig, HttpExpenseClient};
//! use spendwise::controller::{TerminalView, ViewController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpExpenseClient::new(ClientConfig::new("http://localhost:5000"))?;
//!     let mut controller = ViewController::new(client, TerminalView::stdout());
//!
//!     // Summary and first page, requested together
//!     controller.initialize().await;
//!
//!     // Next page of entries
//!     controller.load_more().await;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod format;
pub mod model;
pub mod store;

// Re-export top-level types for convenience
pub use model::{Entry, EntryForm, EntryType, Filter, SummaryTotals};

pub use store::{ExpenseStore, ListQuery, NewExpense, StoreError, StoreResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use client::{ClientConfig, ClientError, ExpenseApi, HttpExpenseClient};

pub use controller::{EntryList, TerminalView, View, ViewController};

pub use config::{Config, ConfigError, LoggingConfig};
