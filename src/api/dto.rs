//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::model::{EntryType, Filter, DATE_FORMAT};
use crate::store::{ListQuery, NewExpense};

// ============================================
// LIST DTOs
// ============================================

/// Query parameters of `GET /expenses`
///
/// Numbers arrive as raw strings so that malformed values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default, rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ListParams {
    /// Resolve into a store query, using `default_limit` when `limit` is absent
    pub fn into_query(self, default_limit: usize) -> ApiResult<ListQuery> {
        let page = parse_or(self.page.as_deref(), 1);
        let limit = parse_or(self.limit.as_deref(), default_limit);

        let mut filter = Filter::new();
        if let Some(start) = non_empty(self.start_date.as_deref()) {
            filter.start_date = Some(parse_date("startDate", start)?);
        }
        if let Some(end) = non_empty(self.end_date.as_deref()) {
            filter.end_date = Some(parse_date("endDate", end)?);
        }
        if let Some(category) = non_empty(self.category.as_deref()) {
            filter = filter.category(category);
        }

        Ok(ListQuery::page(page).limit(limit).filter(filter))
    }
}

fn parse_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(field: &str, raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| ApiError::Validation(format!("Invalid data format: {} ({})", field, e)))
}

// ============================================
// ADD DTOs
// ============================================

/// Body of `POST /add`, from JSON or a form
///
/// Every field is optional at the wire level so that a missing field is
/// reported by name. `amount` may be a number or a numeric string.
#[derive(Debug, Default, Deserialize)]
pub struct AddEntryRequest {
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl AddEntryRequest {
    /// Check required fields and parse amount, type and date
    pub fn validate(self) -> ApiResult<NewExpense> {
        let amount = self.amount.ok_or_else(|| missing("amount"))?;
        let description = self.description.ok_or_else(|| missing("description"))?;
        let category = self.category.ok_or_else(|| missing("category"))?;
        let entry_type = self.entry_type.ok_or_else(|| missing("type"))?;
        let date = self.date.ok_or_else(|| missing("date"))?;

        let amount = parse_amount(&amount)?;
        let entry_type = entry_type
            .parse::<EntryType>()
            .map_err(|e| ApiError::Validation(format!("Invalid data format: {}", e)))?;
        let date = parse_date("date", date.trim())?;

        Ok(NewExpense::new(amount, description, category, entry_type, date))
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::Validation(format!("Missing required field: {}", field))
}

fn parse_amount(value: &serde_json::Value) -> ApiResult<f64> {
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    amount
        .filter(|a| a.is_finite())
        .ok_or_else(|| ApiError::Validation(format!("Invalid data format: amount {}", value)))
}

/// Successful `POST /add` response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddEntryResponse {
    pub message: String,
    pub id: i64,
}

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Database status: ok or error
    pub database: String,
    /// Number of stored entries, when the database is reachable
    pub entries: Option<usize>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults_and_fallbacks() {
        let query = ListParams::default().into_query(10).unwrap();
        assert_eq!(query, ListQuery::page(1).limit(10));

        let params = ListParams {
            page: Some("abc".into()),
            limit: Some("25".into()),
            start_date: Some("".into()),
            category: Some("food".into()),
            ..Default::default()
        };
        let query = params.into_query(10).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 25);
        assert_eq!(query.filter.start_date, None);
        assert_eq!(query.filter.category.as_deref(), Some("food"));
    }

    #[test]
    fn test_list_params_bad_date() {
        let params = ListParams {
            end_date: Some("31/01/2024".into()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(10), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_add_request_reports_first_missing_field() {
        let req: AddEntryRequest =
            serde_json::from_str(r#"{"amount": 5, "description": "x", "type": "expense"}"#).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: category");
    }

    #[test]
    fn test_add_request_accepts_string_amount() {
        let req: AddEntryRequest = serde_json::from_str(
            r#"{"amount": "12.5", "description": "Taxi", "category": "travel", "type": "expense", "date": "2024-02-02"}"#,
        )
        .unwrap();
        let expense = req.validate().unwrap();
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.entry_type, EntryType::Expense);
    }

    #[test]
    fn test_add_request_rejects_bad_values() {
        let base = |amount: &str, kind: &str, date: &str| -> AddEntryRequest {
            serde_json::from_value(serde_json::json!({
                "amount": amount, "description": "d", "category": "c", "type": kind, "date": date
            }))
            .unwrap()
        };

        assert!(base("ten", "expense", "2024-01-01").validate().is_err());
        assert!(base("10", "transfer", "2024-01-01").validate().is_err());
        assert!(base("10", "income", "2024-13-01").validate().is_err());
        assert!(base("10", "income", "2024-01-01").validate().is_ok());
    }
}
