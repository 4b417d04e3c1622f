//! Export Route
//!
//! - GET /export - Every entry as a CSV attachment

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::Entry;

/// Name offered to the browser for the download
pub const EXPORT_FILENAME: &str = "expenses.csv";

const CSV_HEADER: [&str; 6] = ["ID", "Amount", "Description", "Category", "Type", "Date"];

/// GET /export
pub async fn export_csv(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let entries = state.store.all()?;
    let body = format_csv(&entries)?;

    tracing::info!(rows = entries.len(), bytes = body.len(), "CSV export generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// Encode entries with the `ID,Amount,Description,Category,Type,Date` header
pub fn format_csv(entries: &[Entry]) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        writer.write_record([
            entry.id.map(|id| id.to_string()).unwrap_or_default(),
            csv_amount(entry.amount),
            entry.description.clone(),
            entry.category.clone().unwrap_or_default(),
            entry.entry_type.to_string(),
            entry.date.clone(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))
}

/// Whole amounts keep one decimal place (`50.0`); others print as-is
fn csv_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < 1e16 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}
