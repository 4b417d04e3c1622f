//! reqwest implementation of `ExpenseApi`

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{ClientError, ClientResult, ExpenseApi};
use crate::model::{Entry, EntryForm, Filter, SummaryTotals, DEFAULT_PAGE_SIZE};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Spendwise server (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Rows requested per page
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for the Spendwise REST API
///
/// No timeout or retry policy is configured; requests rely on the
/// platform defaults.
#[derive(Debug, Clone)]
pub struct HttpExpenseClient {
    client: Client,
    base_url: String,
    page_size: usize,
}

impl HttpExpenseClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url,
            page_size: config.page_size.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Download the CSV export as text
    pub async fn fetch_export(&self) -> ClientResult<String> {
        let response = self.client.get(self.export_url()).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Download the CSV export into `path`, returning the number of bytes written
    pub async fn download_export(&self, path: &std::path::Path) -> ClientResult<usize> {
        let body = self.fetch_export().await?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, body.as_bytes())?;
        tracing::info!(path = ?path, bytes = body.len(), "Export saved");
        Ok(body.len())
    }
}

#[async_trait]
impl ExpenseApi for HttpExpenseClient {
    async fn summary(&self) -> ClientResult<SummaryTotals> {
        let response = self.client.get(self.url("/summary")).send().await?;
        decode(ensure_success(response).await?).await
    }

    async fn list_entries(&self, page: usize, filter: &Filter) -> ClientResult<Vec<Entry>> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.max(1).to_string()),
            ("limit", self.page_size.to_string()),
        ];
        query.extend(filter.query_pairs());

        tracing::debug!(page, filtered = !filter.is_empty(), "Fetching entries");

        let response = self
            .client
            .get(self.url("/expenses"))
            .query(&query)
            .send()
            .await?;
        decode(ensure_success(response).await?).await
    }

    async fn add_entry(&self, form: &EntryForm) -> ClientResult<serde_json::Value> {
        let response = self
            .client
            .post(self.url("/add"))
            .json(form)
            .send()
            .await?;
        decode(ensure_success(response).await?).await
    }

    async fn delete_entry(&self, id: i64) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/delete/{}", id)))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    fn export_url(&self) -> String {
        self.url("/export")
    }
}

/// Turn a non-2xx response into `ClientError::Status`, keeping the server's message
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Extract a human-readable message from an error body
///
/// Accepts `{"error": {"message": ..}}`, `{"error": ".."}` or plain text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json["error"]["message"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}
