//! Client-side entry list model
//!
//! The rendered list is derived from this model rather than read back from
//! the view. All changes go through `EntryList::apply`.

use crate::model::{Entry, Filter, DEFAULT_PAGE_SIZE};

/// Page that the legacy dashboard would request next, derived from the
/// number of rows currently rendered: `ceil(count / page_size) + 1`.
///
/// A short last page makes this disagree with the real cursor (15 rows
/// rendered gives page 2, which is already loaded); the controller only
/// uses it to report drift.
pub fn page_for_rendered_count(rendered: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    rendered.div_ceil(page_size) + 1
}

/// Changes applied to the entry list
#[derive(Debug, Clone, PartialEq)]
pub enum EntryListAction {
    /// A page of the (optionally filtered) list arrived
    PageLoaded { page: usize, entries: Vec<Entry> },
    /// A filter was applied and its matches arrived
    FilterApplied { filter: Filter, entries: Vec<Entry> },
}

/// What an action did to the rendered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// All rows were replaced
    Replaced,
    /// New rows start at this index
    Appended { from: usize },
    /// Stale, duplicate or out-of-sequence page, nothing changed
    Ignored,
}

/// Ordered entries plus the explicit pagination cursor
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList {
    items: Vec<Entry>,
    page_size: usize,
    next_page: usize,
    exhausted: bool,
    total_count: Option<usize>,
    active_filter: Option<Filter>,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl EntryList {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            next_page: 1,
            exhausted: false,
            total_count: None,
            active_filter: None,
        }
    }

    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page to request on "load more"
    pub fn next_page(&self) -> usize {
        self.next_page
    }

    /// True once a short page has been seen
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Total number of entries, known only once the list is exhausted
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Filter behind the rows shown, if they are a filtered view
    pub fn active_filter(&self) -> Option<&Filter> {
        self.active_filter.as_ref()
    }

    /// A filtered view is a single fresh load and never paginates
    pub fn can_load_more(&self) -> bool {
        !self.exhausted && self.active_filter.is_none()
    }

    /// Legacy cursor computed from the rendered row count
    pub fn legacy_next_page(&self) -> usize {
        page_for_rendered_count(self.items.len(), self.page_size)
    }

    /// Apply an action and report how the rows changed
    ///
    /// Page 1 always replaces the rows and leaves any filtered view. A later
    /// page is appended only when it is exactly `next_page` of the unfiltered
    /// list; repeats, gaps and pages arriving while a filter is shown are
    /// ignored.
    pub fn apply(&mut self, action: EntryListAction) -> ListChange {
        match action {
            EntryListAction::PageLoaded { page, entries } => {
                let page = page.max(1);
                if page == 1 {
                    self.items = entries;
                    self.active_filter = None;
                    self.after_page(1, self.items.len());
                    ListChange::Replaced
                } else if self.active_filter.is_some() {
                    tracing::warn!(page, "Ignoring page response while a filter is shown");
                    ListChange::Ignored
                } else if page == self.next_page {
                    let from = self.items.len();
                    let received = entries.len();
                    self.items.extend(entries);
                    self.after_page(page, received);
                    ListChange::Appended { from }
                } else {
                    tracing::warn!(
                        page,
                        expected = self.next_page,
                        "Ignoring out-of-order page response"
                    );
                    ListChange::Ignored
                }
            }
            EntryListAction::FilterApplied { filter, entries } => {
                self.items = entries;
                self.active_filter = if filter.is_empty() { None } else { Some(filter) };
                self.after_page(1, self.items.len());
                ListChange::Replaced
            }
        }
    }

    fn after_page(&mut self, page: usize, received: usize) {
        self.next_page = page + 1;
        self.exhausted = received < self.page_size;
        self.total_count = if self.exhausted {
            Some(self.items.len())
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryType;

    fn entries(n: usize, tag: &str) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new("2024-01-01", format!("{} {}", tag, i), 1.0, EntryType::Expense))
            .collect()
    }

    #[test]
    fn test_legacy_cursor() {
        assert_eq!(page_for_rendered_count(0, 10), 1);
        assert_eq!(page_for_rendered_count(10, 10), 2);
        assert_eq!(page_for_rendered_count(15, 10), 2);
        assert_eq!(page_for_rendered_count(20, 10), 3);
        assert_eq!(page_for_rendered_count(3, 0), 4);
    }

    #[test]
    fn test_first_page_replaces() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });
        list.apply(EntryListAction::PageLoaded { page: 2, entries: entries(10, "b") });

        let change = list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "c") });

        assert_eq!(change, ListChange::Replaced);
        assert_eq!(list.len(), 10);
        assert!(list.items().iter().all(|e| e.description.starts_with('c')));
        assert_eq!(list.next_page(), 2);
    }

    #[test]
    fn test_later_pages_append() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });

        let change = list.apply(EntryListAction::PageLoaded { page: 2, entries: entries(10, "b") });

        assert_eq!(change, ListChange::Appended { from: 10 });
        assert_eq!(list.len(), 20);
        assert_eq!(list.items()[0].description, "a 0");
        assert_eq!(list.items()[10].description, "b 0");
        assert_eq!(list.next_page(), 3);
        assert!(!list.is_exhausted());
        assert_eq!(list.total_count(), None);
    }

    #[test]
    fn test_short_page_exhausts_and_fixes_cursor_drift() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });
        list.apply(EntryListAction::PageLoaded { page: 2, entries: entries(5, "b") });

        assert!(list.is_exhausted());
        assert_eq!(list.total_count(), Some(15));
        // Explicit cursor moves on; the row-count cursor would re-request page 2
        assert_eq!(list.next_page(), 3);
        assert_eq!(list.legacy_next_page(), 2);
    }

    #[test]
    fn test_stale_page_ignored() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });
        list.apply(EntryListAction::PageLoaded { page: 2, entries: entries(10, "b") });

        // Overlapping "load more" response for a page already shown
        let change = list.apply(EntryListAction::PageLoaded { page: 2, entries: entries(10, "dup") });

        assert_eq!(change, ListChange::Ignored);
        assert_eq!(list.len(), 20);
    }

    #[test]
    fn test_gap_page_ignored() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });

        let change = list.apply(EntryListAction::PageLoaded { page: 3, entries: entries(10, "c") });

        assert_eq!(change, ListChange::Ignored);
        assert_eq!(list.len(), 10);
        assert_eq!(list.next_page(), 2);
    }

    #[test]
    fn test_filtered_view_does_not_paginate() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });

        let filter = Filter::new().category("food");
        let change = list.apply(EntryListAction::FilterApplied {
            filter: filter.clone(),
            entries: entries(10, "f"),
        });

        assert_eq!(change, ListChange::Replaced);
        assert_eq!(list.active_filter(), Some(&filter));
        assert!(!list.can_load_more());

        // An unfiltered page 2 must not be mixed into the filtered rows
        let change = list.apply(EntryListAction::PageLoaded { page: 2, entries: entries(10, "b") });
        assert_eq!(change, ListChange::Ignored);
        assert_eq!(list.len(), 10);

        // Page 1 leaves the filtered view
        list.apply(EntryListAction::PageLoaded { page: 1, entries: entries(10, "a") });
        assert_eq!(list.active_filter(), None);
        assert!(list.can_load_more());
        assert_eq!(list.items()[0].description, "a 0");
    }

    #[test]
    fn test_empty_filter_is_not_active() {
        let mut list = EntryList::new(10);
        list.apply(EntryListAction::FilterApplied {
            filter: Filter::default(),
            entries: entries(10, "a"),
        });
        assert_eq!(list.active_filter(), None);
    }
}
