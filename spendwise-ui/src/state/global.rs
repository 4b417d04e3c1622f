//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use super::entries::{EntryList, EntryListAction};
use super::modal::ModalState;
use super::theme::Theme;

/// Rows per `/expenses` page
pub const PAGE_SIZE: usize = 10;

/// Prefix for every rendered amount
pub const CURRENCY_SYMBOL: &str = "₹";

pub const ADD_SUCCESS_MESSAGE: &str = "Entry added successfully!";
pub const ADD_FAILURE_MESSAGE: &str = "Error adding entry. Please try again.";

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Totals from the last successful `/summary`
    pub summary: RwSignal<Option<SummaryTotals>>,
    /// Entry list model
    pub entries: RwSignal<EntryList>,
    /// Which modal, if any, is visible
    pub modal: RwSignal<ModalState>,
    /// Current colour theme
    pub theme: RwSignal<Theme>,
    /// A list request is in flight
    pub loading: RwSignal<bool>,
}

/// Totals from `GET /summary`
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_expense: f64,
    pub total_income: f64,
    pub net_balance: f64,
}

/// One ledger entry from `GET /expenses`
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Entry {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Entry {
    pub fn is_expense(&self) -> bool {
        self.entry_type == "expense"
    }

    /// `date: description`
    pub fn label(&self) -> String {
        format!("{}: {}", self.date, self.description)
    }

    /// `-₹50` / `+₹50`; the amount keeps its natural formatting
    pub fn signed_amount(&self) -> String {
        let sign = if self.is_expense() { '-' } else { '+' };
        format!("{}{}{}", sign, CURRENCY_SYMBOL, self.amount)
    }
}

/// Raw filter inputs; empty strings mean "no constraint"
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryFilter {
    pub start_date: String,
    pub end_date: String,
    pub category: String,
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_empty() && self.end_date.is_empty() && self.category.trim().is_empty()
    }

    /// `&startDate=..&endDate=..&category=..` for the non-empty fields
    pub fn query_suffix(&self) -> String {
        [
            ("startDate", self.start_date.as_str()),
            ("endDate", self.end_date.as_str()),
            ("category", self.category.trim()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("&{}={}", key, urlencoding::encode(value)))
        .collect()
    }
}

/// `₹1234.50`
pub fn format_currency(value: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, value)
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        summary: create_rw_signal(None),
        entries: create_rw_signal(EntryList::default()),
        modal: create_rw_signal(ModalState::default()),
        theme: create_rw_signal(Theme::default()),
        loading: create_rw_signal(false),
    };

    provide_context(state);
}

impl GlobalState {
    /// Run an action through the entry list reducer; false if it was dropped
    pub fn update_entries(&self, action: EntryListAction) -> bool {
        let mut applied = false;
        self.entries.update(|list| applied = list.apply(action));
        applied
    }

    /// Blocking browser alert
    pub fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    /// Switch theme and sync the class on `<body>`
    pub fn toggle_theme(&self) {
        let theme = self.theme.get_untracked().toggled();
        self.theme.set(theme);

        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            let _ = body
                .class_list()
                .toggle_with_force(Theme::BODY_CLASS, theme.is_dark());
        }
    }

    /// Leave the page for `url` (used for the CSV download)
    pub fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                web_sys::console::error_2(&"Navigation failed:".into(), &e);
            }
        }
    }
}
