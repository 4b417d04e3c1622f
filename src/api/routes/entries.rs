//! Entry Routes
//!
//! - GET /expenses - One page of entries, optionally filtered
//! - POST /add - Create an entry from JSON or form data
//! - DELETE /delete/:id - Delete an entry

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{AddEntryRequest, AddEntryResponse, ListParams, MessageResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::Entry;

/// GET /expenses
///
/// Newest entries first. `page` defaults to 1 and `limit` to the
/// configured page size; `startDate`/`endDate` are inclusive.
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Entry>>> {
    let query = params.into_query(state.config.default_page_size)?;
    let entries = state.store.list(&query)?;

    tracing::debug!(
        page = query.page,
        limit = query.limit,
        returned = entries.len(),
        "Listed entries"
    );

    Ok(Json(entries))
}

/// POST /add
///
/// Accepts `application/json` or `application/x-www-form-urlencoded`.
pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<AddEntryResponse>)> {
    let request = parse_add_body(&headers, &body)?;
    let expense = request.validate()?;
    let id = state.store.add(&expense)?;

    tracing::info!(id, amount = expense.amount, kind = %expense.entry_type, "Entry added");

    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            message: "Entry added successfully".to_string(),
            id,
        }),
    ))
}

/// DELETE /delete/:id
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.delete(id)? {
        return Err(ApiError::NotFound("Entry not found".to_string()));
    }

    tracing::info!(id, "Entry deleted");
    Ok(Json(MessageResponse {
        message: "Entry deleted successfully".to_string(),
    }))
}

fn parse_add_body(headers: &HeaderMap, body: &[u8]) -> ApiResult<AddEntryRequest> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let fields = parse_form(body)?;
        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| ApiError::Validation(format!("Invalid form body: {}", e)))
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e)))
    }
}

/// Decode `a=1&b=two+words` into string fields
fn parse_form(body: &[u8]) -> ApiResult<serde_json::Map<String, serde_json::Value>> {
    let text = std::str::from_utf8(body)
        .map_err(|_| ApiError::Validation("Form body is not valid UTF-8".to_string()))?;

    let mut fields = serde_json::Map::new();
    for pair in text.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        fields.insert(decode_form_component(key)?, decode_form_component(value)?.into());
    }
    Ok(fields)
}

fn decode_form_component(raw: &str) -> ApiResult<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|s| s.into_owned())
        .map_err(|e| ApiError::Validation(format!("Invalid form encoding: {}", e)))
}
