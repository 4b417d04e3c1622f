//! Core data types shared by the server, the HTTP client and the view controller
//!
//! - `Entry`: one income or expense record as it travels over the wire
//! - `EntryType`: expense or income
//! - `SummaryTotals`: aggregate totals over all entries
//! - `Filter`: transient date/category filter for the entry list
//! - `EntryForm`: flat key/value form data submitted for a new entry

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Number of entries in one page of the list
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Wire format for entry dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single income or expense record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Row id assigned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Date in `YYYY-MM-DD` form
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Entry {
    /// Create an entry without server-side fields
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        entry_type: EntryType,
    ) -> Self {
        Self {
            id: None,
            date: date.into(),
            description: description.into(),
            amount,
            entry_type,
            category: None,
        }
    }

    /// Builder method: set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder method: set the id
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Whether an entry takes money out or brings it in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Expense,
    Income,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Expense => "expense",
            EntryType::Income => "income",
        }
    }

    /// Sign shown in front of rendered amounts
    pub fn sign(&self) -> char {
        match self {
            EntryType::Expense => '-',
            EntryType::Income => '+',
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(EntryType::Expense),
            "income" => Ok(EntryType::Income),
            other => Err(format!("unknown entry type: {}", other)),
        }
    }
}

/// Aggregate totals computed server-side over all entries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_expense: f64,
    pub total_income: f64,
    pub net_balance: f64,
}

impl SummaryTotals {
    /// Build totals from the two sums, rounding everything to cents
    pub fn from_sums(total_expense: f64, total_income: f64) -> Self {
        Self {
            total_expense: round_cents(total_expense),
            total_income: round_cents(total_income),
            net_balance: round_cents(total_income - total_expense),
        }
    }
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Date range and category filter for the entry list
///
/// Read from the filter inputs when applied and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: lower date bound (inclusive)
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Builder method: upper date bound (inclusive)
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Builder method: exact category match
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Parse raw input values; empty strings mean "no constraint"
    pub fn from_inputs(start: &str, end: &str, category: &str) -> Result<Self, chrono::ParseError> {
        let mut filter = Filter::new().category(category);
        if !start.trim().is_empty() {
            filter.start_date = Some(NaiveDate::parse_from_str(start.trim(), DATE_FORMAT)?);
        }
        if !end.trim().is_empty() {
            filter.end_date = Some(NaiveDate::parse_from_str(end.trim(), DATE_FORMAT)?);
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.category.is_none()
    }

    /// Query parameters understood by `GET /expenses`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format(DATE_FORMAT).to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

/// Flat key/value fields of the new-entry form
///
/// Values stay strings, the way a browser form serializes them; the
/// server is responsible for parsing amounts and dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EntryForm {
    fields: BTreeMap<String, String>,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Clear every field, like `form.reset()`
    pub fn reset(&mut self) {
        self.fields.clear();
    }
}
