//! Summary Route
//!
//! - GET /summary - Totals over all entries

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::model::SummaryTotals;

/// GET /summary
///
/// Total expense, total income and net balance, rounded to cents.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<SummaryTotals>> {
    Ok(Json(state.store.summary()?))
}
