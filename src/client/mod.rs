//! Spendwise API Client
//!
//! The `ExpenseApi` trait is the seam between the view controller and the
//! backend. `HttpExpenseClient` implements it over HTTP; tests substitute
//! an in-memory implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use spendwise::client::{ClientConfig, ExpenseApi, HttpExpenseClient};
//! use spendwise::model::Filter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpExpenseClient::new(ClientConfig::default())?;
//!
//!     let totals = client.summary().await?;
//!     let page = client.list_entries(1, &Filter::default()).await?;
//!
//!     println!("{} entries, net {:.2}", page.len(), totals.net_balance);
//!     Ok(())
//! }
//! ```

mod http;

pub use http::{ClientConfig, HttpExpenseClient};

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Entry, EntryForm, Filter, SummaryTotals};

/// Operations the view controller needs from the backend
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// `GET /summary`
    async fn summary(&self) -> ClientResult<SummaryTotals>;

    /// `GET /expenses` for one page, narrowed by `filter`
    async fn list_entries(&self, page: usize, filter: &Filter) -> ClientResult<Vec<Entry>>;

    /// `POST /add` with the form fields as a flat JSON object
    async fn add_entry(&self, form: &EntryForm) -> ClientResult<serde_json::Value>;

    /// `DELETE /delete/:id`
    async fn delete_entry(&self, id: i64) -> ClientResult<()>;

    /// Location of the CSV download
    fn export_url(&self) -> String;
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS or body transfer failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Base URL could not be combined with an endpoint path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Local IO failure (writing a download)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// True when the server rejected the request rather than the transport failing
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if (400..500).contains(status))
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
