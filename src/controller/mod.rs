//! Spendwise View Controller
//!
//! Wires user actions to the backend and renders results through a `View`.
//!
//! - **model**: Explicit entry list model and reducer
//! - **terminal**: `View` implementation that writes to a terminal
//!
//! # Operations
//!
//! | Operation          | Request                         | On success                      | On failure       |
//! |--------------------|---------------------------------|---------------------------------|------------------|
//! | `initialize`       | summary + page 1                | render both                     | log              |
//! | `refresh_summary`  | `GET /summary`                  | three currency strings          | log, keep values |
//! | `load_entries(n)`  | `GET /expenses?page=n`          | n == 1 replaces, else appends   | log              |
//! | `load_more`        | next unfiltered page            | append                          | log              |
//! | `submit_entry`     | `POST /add`                     | alert, reset, reload, summary   | alert            |
//! | `apply_filter`     | `GET /expenses?startDate=..`    | replace, no pagination          | log              |
//! | `clear_filter`     | `GET /expenses?page=1`          | replace                         | log              |
//! | `export_csv`       | none                            | navigate to the export URL      | n/a              |

pub mod model;
pub mod terminal;

pub use model::{page_for_rendered_count, EntryList, EntryListAction, ListChange};
pub use terminal::TerminalView;

use crate::client::ExpenseApi;
use crate::format::{
    format_currency, format_entry_label, format_signed_amount, DEFAULT_CURRENCY_SYMBOL,
};
use crate::model::{Entry, EntryForm, EntryType, Filter, SummaryTotals, DEFAULT_PAGE_SIZE};

/// Confirmation shown after an entry is stored
pub const ADD_SUCCESS_MESSAGE: &str = "Entry added successfully!";

/// Generic message shown for any failure to store an entry
pub const ADD_FAILURE_MESSAGE: &str = "Error adding entry. Please try again.";

/// The three formatted totals shown in the summary area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDisplay {
    pub total_expense: String,
    pub total_income: String,
    pub net_balance: String,
}

impl SummaryDisplay {
    pub fn from_totals(symbol: &str, totals: &SummaryTotals) -> Self {
        Self {
            total_expense: format_currency(symbol, totals.total_expense),
            total_income: format_currency(symbol, totals.total_income),
            net_balance: format_currency(symbol, totals.net_balance),
        }
    }
}

/// One rendered entry row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: Option<i64>,
    /// `date: description`
    pub label: String,
    /// Signed, symbol-prefixed amount
    pub amount: String,
    pub entry_type: EntryType,
}

impl EntryRow {
    pub fn from_entry(symbol: &str, entry: &Entry) -> Self {
        Self {
            id: entry.id,
            label: format_entry_label(entry),
            amount: format_signed_amount(symbol, entry),
            entry_type: entry.entry_type,
        }
    }
}

/// Rendering surface driven by the controller
pub trait View {
    /// Paint the three summary totals
    fn render_summary(&mut self, summary: &SummaryDisplay);

    /// Paint the entry list; `rows` is always the full list
    fn render_entries(&mut self, rows: &[EntryRow], change: ListChange);

    /// Blocking user notification
    fn alert(&mut self, message: &str);

    /// Clear the new-entry form
    fn reset_form(&mut self);

    /// Leave the page for `url` (file download)
    fn navigate(&mut self, url: &str);
}

/// Stateless request/render cycles over an explicit entry list model
pub struct ViewController<A, V> {
    api: A,
    view: V,
    entries: EntryList,
    summary: Option<SummaryTotals>,
    currency_symbol: String,
}

impl<A: ExpenseApi, V: View> ViewController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            entries: EntryList::new(DEFAULT_PAGE_SIZE),
            summary: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Builder method: currency symbol for rendered amounts
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Builder method: rows per page (must match what the API client requests)
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.entries = EntryList::new(page_size);
        self
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    /// Totals from the last successful summary refresh
    pub fn summary(&self) -> Option<&SummaryTotals> {
        self.summary.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn into_parts(self) -> (A, V) {
        (self.api, self.view)
    }

    /// Initial summary load and first page of entries, issued concurrently
    pub async fn initialize(&mut self) {
        tracing::debug!("Initializing view controller");

        let no_filter = Filter::default();
        let (summary, page) = tokio::join!(
            self.api.summary(),
            self.api.list_entries(1, &no_filter)
        );

        match summary {
            Ok(totals) => self.show_summary(totals),
            Err(e) => tracing::error!(error = %e, "Failed to load summary"),
        }
        match page {
            Ok(entries) => {
                self.update_entries(EntryListAction::PageLoaded { page: 1, entries });
            }
            Err(e) => tracing::error!(error = %e, page = 1, "Failed to load entries"),
        }
    }

    /// Fetch and render the totals; failures leave the previous values in place
    pub async fn refresh_summary(&mut self) -> bool {
        match self.api.summary().await {
            Ok(totals) => {
                self.show_summary(totals);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh summary");
                false
            }
        }
    }

    /// Fetch one page of the unfiltered list; page 1 replaces the rows
    /// (leaving any filtered view), later pages append.
    ///
    /// Returns false when the request fails or the model drops the page as
    /// out of sequence.
    pub async fn load_entries(&mut self, page: usize) -> bool {
        let page = page.max(1);
        let no_filter = Filter::default();

        match self.api.list_entries(page, &no_filter).await {
            Ok(entries) => {
                let received = entries.len();
                match self.update_entries(EntryListAction::PageLoaded { page, entries }) {
                    ListChange::Ignored => false,
                    _ => {
                        tracing::debug!(page, received, "Loaded entries");
                        true
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, page, "Failed to load entries");
                false
            }
        }
    }

    /// Load the page after the last one shown
    pub async fn load_more(&mut self) -> bool {
        if self.entries.active_filter().is_some() {
            tracing::info!("Filtered view has no further pages");
            return false;
        }
        if self.entries.is_exhausted() {
            tracing::info!(total = ?self.entries.total_count(), "No more entries to load");
            return false;
        }

        let page = self.entries.next_page();
        let legacy = self.entries.legacy_next_page();
        if legacy != page {
            tracing::debug!(page, legacy, rendered = self.entries.len(), "Row-count cursor drift");
        }

        self.load_entries(page).await
    }

    /// Post the form; on success confirm, reset, reload page 1 and the totals
    pub async fn submit_entry(&mut self, form: &EntryForm) -> bool {
        match self.api.add_entry(form).await {
            Ok(response) => {
                tracing::info!(response = %response, "Entry added");
                self.view.alert(ADD_SUCCESS_MESSAGE);
                self.view.reset_form();
                self.load_entries(1).await;
                self.refresh_summary().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, rejected = e.is_rejection(), "Failed to add entry");
                self.view.alert(ADD_FAILURE_MESSAGE);
                false
            }
        }
    }

    /// Replace the list with the entries matching `filter`
    ///
    /// The result is a single fresh load: `load_more` does nothing until
    /// page 1 is loaded again.
    pub async fn apply_filter(&mut self, filter: Filter) -> bool {
        match self.api.list_entries(1, &filter).await {
            Ok(entries) => {
                tracing::debug!(received = entries.len(), ?filter, "Filter applied");
                self.update_entries(EntryListAction::FilterApplied { filter, entries });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, ?filter, "Failed to apply filter");
                false
            }
        }
    }

    /// Leave the filtered view by reloading the first unfiltered page
    ///
    /// On failure the filtered rows stay on screen.
    pub async fn clear_filter(&mut self) -> bool {
        self.load_entries(1).await
    }

    /// Delete an entry, then reload page 1 and the totals
    pub async fn delete_entry(&mut self, id: i64) -> bool {
        match self.api.delete_entry(id).await {
            Ok(()) => {
                tracing::info!(id, "Entry deleted");
                self.load_entries(1).await;
                self.refresh_summary().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Failed to delete entry");
                false
            }
        }
    }

    /// Hand the export URL to the view
    pub fn export_csv(&mut self) {
        let url = self.api.export_url();
        self.view.navigate(&url);
    }

    fn show_summary(&mut self, totals: SummaryTotals) {
        let display = SummaryDisplay::from_totals(&self.currency_symbol, &totals);
        self.view.render_summary(&display);
        self.summary = Some(totals);
    }

    fn update_entries(&mut self, action: EntryListAction) -> ListChange {
        let change = self.entries.apply(action);
        if change == ListChange::Ignored {
            return change;
        }

        let rows: Vec<EntryRow> = self
            .entries
            .items()
            .iter()
            .map(|entry| EntryRow::from_entry(&self.currency_symbol, entry))
            .collect();
        self.view.render_entries(&rows, change);
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ClientResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory backend with call counters
    #[derive(Default)]
    struct FakeApi {
        entries: Mutex<Vec<Entry>>,
        totals: Mutex<SummaryTotals>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        summary_calls: AtomicUsize,
        list_calls: Mutex<Vec<(usize, Filter)>>,
    }

    impl FakeApi {
        fn with_entries(n: usize) -> Self {
            let api = FakeApi::default();
            {
                let mut entries = api.entries.lock().unwrap();
                for i in 0..n {
                    entries.push(Entry::new(
                        format!("2024-01-{:02}", (i % 28) + 1),
                        format!("item {}", i),
                        (i + 1) as f64,
                        if i % 2 == 0 { EntryType::Expense } else { EntryType::Income },
                    ).category(if i % 3 == 0 { "food" } else { "misc" }));
                }
            }
            *api.totals.lock().unwrap() = SummaryTotals::from_sums(50.0, 150.5);
            api
        }

        fn list_pages(&self) -> Vec<usize> {
            self.list_calls.lock().unwrap().iter().map(|(p, _)| *p).collect()
        }
    }

    #[async_trait]
    impl ExpenseApi for FakeApi {
        async fn summary(&self) -> ClientResult<SummaryTotals> {
            self.summary_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(ClientError::Decode("offline".to_string()));
            }
            Ok(*self.totals.lock().unwrap())
        }

        async fn list_entries(&self, page: usize, filter: &Filter) -> ClientResult<Vec<Entry>> {
            self.list_calls.lock().unwrap().push((page, filter.clone()));
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(ClientError::Decode("offline".to_string()));
            }
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .iter()
                .filter(|e| filter.category.is_none() || e.category == filter.category)
                .skip((page - 1) * DEFAULT_PAGE_SIZE)
                .take(DEFAULT_PAGE_SIZE)
                .cloned()
                .collect())
        }

        async fn add_entry(&self, form: &EntryForm) -> ClientResult<serde_json::Value> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ClientError::Status {
                    status: 400,
                    message: "Missing required field: amount".to_string(),
                });
            }
            let entry = Entry::new(
                form.get("date").unwrap_or_default(),
                form.get("description").unwrap_or_default(),
                form.get("amount").and_then(|a| a.parse().ok()).unwrap_or(0.0),
                form.get("type").and_then(|t| t.parse().ok()).unwrap_or(EntryType::Expense),
            );
            self.entries.lock().unwrap().insert(0, entry);
            Ok(serde_json::json!({"message": "Entry added successfully", "id": 1}))
        }

        async fn delete_entry(&self, _id: i64) -> ClientResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ClientError::Status {
                    status: 404,
                    message: "Entry not found".to_string(),
                });
            }
            self.entries.lock().unwrap().remove(0);
            Ok(())
        }

        fn export_url(&self) -> String {
            "http://test/export".to_string()
        }
    }

    /// View that records every call
    #[derive(Default)]
    struct RecordingView {
        summary: Option<SummaryDisplay>,
        rows: Vec<EntryRow>,
        changes: Vec<ListChange>,
        alerts: Vec<String>,
        form_resets: usize,
        navigations: Vec<String>,
    }

    impl View for RecordingView {
        fn render_summary(&mut self, summary: &SummaryDisplay) {
            self.summary = Some(summary.clone());
        }

        fn render_entries(&mut self, rows: &[EntryRow], change: ListChange) {
            self.rows = rows.to_vec();
            self.changes.push(change);
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn reset_form(&mut self) {
            self.form_resets += 1;
        }

        fn navigate(&mut self, url: &str) {
            self.navigations.push(url.to_string());
        }
    }

    fn controller(api: FakeApi) -> ViewController<FakeApi, RecordingView> {
        ViewController::new(api, RecordingView::default())
    }

    fn new_entry_form() -> EntryForm {
        EntryForm::new()
            .field("date", "2024-02-01")
            .field("description", "Books")
            .field("amount", "42")
            .field("type", "expense")
            .field("category", "education")
    }

    #[tokio::test]
    async fn test_initialize_loads_summary_and_first_page() {
        let mut ctl = controller(FakeApi::with_entries(25));
        ctl.initialize().await;

        let summary = ctl.view().summary.clone().unwrap();
        assert_eq!(summary.total_expense, "₹50.00");
        assert_eq!(summary.total_income, "₹150.50");
        assert_eq!(summary.net_balance, "₹100.50");

        assert_eq!(ctl.view().rows.len(), 10);
        assert_eq!(ctl.view().changes, vec![ListChange::Replaced]);
        assert_eq!(ctl.api().list_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_summary_failure_keeps_previous_values() {
        let mut ctl = controller(FakeApi::with_entries(0));
        assert!(ctl.refresh_summary().await);

        ctl.api().fail_reads.store(true, Ordering::SeqCst);
        *ctl.api().totals.lock().unwrap() = SummaryTotals::from_sums(999.0, 0.0);
        assert!(!ctl.refresh_summary().await);

        let summary = ctl.view().summary.clone().unwrap();
        assert_eq!(summary.total_expense, "₹50.00");
        assert!(ctl.view().alerts.is_empty());
    }

    #[tokio::test]
    async fn test_page_one_clears_and_later_pages_append() {
        let mut ctl = controller(FakeApi::with_entries(25));

        ctl.load_entries(1).await;
        ctl.load_entries(2).await;
        assert_eq!(ctl.view().rows.len(), 20);
        assert_eq!(ctl.view().changes.last(), Some(&ListChange::Appended { from: 10 }));

        ctl.load_entries(1).await;
        assert_eq!(ctl.view().rows.len(), 10);
        assert_eq!(ctl.view().changes.last(), Some(&ListChange::Replaced));
    }

    #[tokio::test]
    async fn test_rows_are_signed_and_prefixed() {
        let mut ctl = controller(FakeApi::default());
        {
            let mut entries = ctl.api().entries.lock().unwrap();
            entries.push(Entry::new("2024-01-05", "Lunch", 50.0, EntryType::Expense));
            entries.push(Entry::new("2024-01-06", "Refund", 50.0, EntryType::Income));
        }

        ctl.load_entries(1).await;

        let rows = &ctl.view().rows;
        assert_eq!(rows[0].label, "2024-01-05: Lunch");
        assert_eq!(rows[0].amount, "-₹50");
        assert_eq!(rows[1].amount, "+₹50");
    }

    #[tokio::test]
    async fn test_load_more_follows_explicit_cursor() {
        let mut ctl = controller(FakeApi::with_entries(25));
        ctl.initialize().await;

        assert!(ctl.load_more().await);
        assert!(ctl.load_more().await);
        assert_eq!(ctl.entries().len(), 25);
        assert!(ctl.entries().is_exhausted());

        // Exhausted list issues no further requests
        assert!(!ctl.load_more().await);
        assert_eq!(ctl.api().list_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_read_failure_is_silent() {
        let api = FakeApi::with_entries(5);
        api.fail_reads.store(true, Ordering::SeqCst);
        let mut ctl = controller(api);

        ctl.initialize().await;

        assert!(ctl.view().rows.is_empty());
        assert!(ctl.view().summary.is_none());
        assert!(ctl.view().alerts.is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_reloads_once() {
        let mut ctl = controller(FakeApi::with_entries(15));
        ctl.initialize().await;
        ctl.load_more().await;
        let summary_calls = ctl.api().summary_calls.load(Ordering::SeqCst);

        assert!(ctl.submit_entry(&new_entry_form()).await);

        assert_eq!(ctl.view().alerts, vec![ADD_SUCCESS_MESSAGE.to_string()]);
        assert_eq!(ctl.view().form_resets, 1);
        assert_eq!(ctl.api().list_pages(), vec![1, 2, 1]);
        assert_eq!(ctl.api().summary_calls.load(Ordering::SeqCst), summary_calls + 1);
        assert_eq!(ctl.view().rows.len(), 10);
        assert_eq!(ctl.view().rows[0].label, "2024-02-01: Books");
    }

    #[tokio::test]
    async fn test_submit_failure_alerts_without_reload() {
        let api = FakeApi::with_entries(3);
        api.fail_writes.store(true, Ordering::SeqCst);
        let mut ctl = controller(api);

        assert!(!ctl.submit_entry(&new_entry_form()).await);

        assert_eq!(ctl.view().alerts, vec![ADD_FAILURE_MESSAGE.to_string()]);
        assert_eq!(ctl.view().form_resets, 0);
        assert!(ctl.api().list_pages().is_empty());
        assert_eq!(ctl.api().summary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_filter_replaces_without_pagination() {
        let mut ctl = controller(FakeApi::with_entries(40));
        ctl.initialize().await;
        ctl.load_more().await;

        let filter = Filter::new().category("food");
        assert!(ctl.apply_filter(filter.clone()).await);

        assert_eq!(ctl.view().changes.last(), Some(&ListChange::Replaced));
        assert_eq!(ctl.entries().active_filter(), Some(&filter));
        // 14 of 40 seeded entries are food; only the first page is shown
        assert_eq!(ctl.view().rows.len(), 10);

        let calls_before = ctl.api().list_pages().len();
        assert!(!ctl.load_more().await);
        assert_eq!(ctl.api().list_pages().len(), calls_before);
        assert_eq!(ctl.view().rows.len(), 10);
    }

    #[tokio::test]
    async fn test_submit_after_filter_reloads_unfiltered() {
        let mut ctl = controller(FakeApi::with_entries(20));
        ctl.apply_filter(Filter::new().category("food")).await;

        assert!(ctl.submit_entry(&new_entry_form()).await);

        let calls = ctl.api().list_calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], (1, Filter::default()));
        assert_eq!(ctl.entries().active_filter(), None);
        assert_eq!(ctl.view().rows[0].label, "2024-02-01: Books");
        assert!(ctl.entries().can_load_more());
    }

    #[tokio::test]
    async fn test_clear_filter_reloads_unfiltered() {
        let mut ctl = controller(FakeApi::with_entries(12));
        ctl.apply_filter(Filter::new().category("food")).await;
        let renders = ctl.view().changes.len();

        assert!(ctl.clear_filter().await);

        assert_eq!(ctl.entries().active_filter(), None);
        assert_eq!(ctl.view().rows.len(), 10);
        // One render for the reloaded page, no empty intermediate state
        assert_eq!(ctl.view().changes.len(), renders + 1);
        let calls = ctl.api().list_calls.lock().unwrap().clone();
        assert!(calls.last().unwrap().1.is_empty());
    }

    #[tokio::test]
    async fn test_clear_filter_failure_keeps_filtered_rows() {
        let mut ctl = controller(FakeApi::with_entries(12));
        ctl.apply_filter(Filter::new().category("food")).await;
        ctl.api().fail_reads.store(true, Ordering::SeqCst);

        assert!(!ctl.clear_filter().await);

        // 4 of 12 seeded entries are food
        assert_eq!(ctl.view().rows.len(), 4);
        assert!(ctl.entries().active_filter().is_some());
    }

    #[tokio::test]
    async fn test_out_of_sequence_page_reports_failure() {
        let mut ctl = controller(FakeApi::with_entries(40));
        assert!(ctl.load_entries(1).await);

        assert!(!ctl.load_entries(3).await);
        assert_eq!(ctl.view().rows.len(), 10);

        assert!(ctl.load_entries(2).await);
        assert!(!ctl.load_entries(2).await);
        assert_eq!(ctl.view().rows.len(), 20);
        assert_eq!(ctl.view().changes.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_reloads() {
        let mut ctl = controller(FakeApi::with_entries(3));
        ctl.initialize().await;

        assert!(ctl.delete_entry(1).await);
        assert_eq!(ctl.view().rows.len(), 2);
        assert_eq!(ctl.api().summary_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_export_navigates() {
        let mut ctl = controller(FakeApi::default());
        ctl.export_csv();
        assert_eq!(ctl.view().navigations, vec!["http://test/export".to_string()]);
    }

    #[tokio::test]
    async fn test_custom_currency_symbol() {
        let mut ctl = controller(FakeApi::with_entries(1)).currency_symbol("$");
        ctl.initialize().await;

        assert_eq!(ctl.view().summary.clone().unwrap().net_balance, "$100.50");
        assert_eq!(ctl.view().rows[0].amount, "-$1");
    }
}
