//! HTTP API Client
//!
//! Functions for communicating with the Spendwise REST API.

use gloo_net::http::Request;

use crate::state::global::{Entry, EntryFilter, SummaryTotals, PAGE_SIZE};

/// Default API base URL (same origin as the dashboard)
pub const DEFAULT_API_BASE: &str = "";

const API_URL_KEY: &str = "spendwise_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    // Normalize: remove trailing slash
    stored
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct AddEntryResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Body of `POST /add`, straight from the form fields
#[derive(Clone, Debug, Default, serde::Serialize, PartialEq)]
pub struct EntryForm {
    pub date: String,
    pub description: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub category: String,
}

// ============ API Functions ============

/// Fetch summary totals
pub async fn fetch_summary() -> Result<SummaryTotals, String> {
    let response = Request::get(&format!("{}/summary", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch one page of entries, newest first
pub async fn fetch_entries(page: usize, filter: &EntryFilter) -> Result<Vec<Entry>, String> {
    let url = format!(
        "{}/expenses?page={}&limit={}{}",
        get_api_base(),
        page,
        PAGE_SIZE,
        filter.query_suffix()
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Submit a new entry
pub async fn submit_entry(form: &EntryForm) -> Result<AddEntryResponse, String> {
    let response = Request::post(&format!("{}/add", get_api_base()))
        .json(form)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// URL the browser navigates to for the CSV download
pub fn export_url() -> String {
    format!("{}/export", get_api_base())
}

async fn error_message(response: gloo_net::http::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("HTTP {}", status),
    }
}
