//! Entry List Model
//!
//! The rendered list is derived from `EntryList`; the pagination cursor is
//! kept explicitly instead of being counted off the rendered rows.

use super::global::{Entry, EntryFilter, PAGE_SIZE};

/// Changes applied to the entry list
#[derive(Clone, Debug, PartialEq)]
pub enum EntryListAction {
    /// A page of the unfiltered list arrived
    PageLoaded { page: usize, entries: Vec<Entry> },
    /// A filter was applied and its matches arrived
    FilterApplied { filter: EntryFilter, entries: Vec<Entry> },
}

/// Ordered entries plus the pagination cursor
#[derive(Clone, Debug, PartialEq)]
pub struct EntryList {
    pub items: Vec<Entry>,
    pub next_page: usize,
    pub exhausted: bool,
    /// Filter behind a filtered view; empty for the plain list
    pub filter: EntryFilter,
}

impl Default for EntryList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            exhausted: false,
            filter: EntryFilter::default(),
        }
    }
}

impl EntryList {
    /// Apply an action; returns false when the page was dropped
    ///
    /// Page 1 replaces the rows and leaves a filtered view. Later pages
    /// append only in sequence and never onto filtered rows.
    pub fn apply(&mut self, action: EntryListAction) -> bool {
        match action {
            EntryListAction::PageLoaded { page, entries } => {
                let page = page.max(1);
                if page == 1 {
                    self.items = entries;
                    self.filter = EntryFilter::default();
                } else if self.is_filtered() {
                    log_warn(&format!("Ignoring page {} while a filter is shown", page));
                    return false;
                } else if page == self.next_page {
                    let received = entries.len();
                    self.items.extend(entries);
                    self.next_page = page + 1;
                    self.exhausted = received < PAGE_SIZE;
                    return true;
                } else {
                    log_warn(&format!(
                        "Ignoring page {} (expected {})",
                        page, self.next_page
                    ));
                    return false;
                }
            }
            EntryListAction::FilterApplied { filter, entries } => {
                self.items = entries;
                self.filter = filter;
            }
        }

        self.next_page = 2;
        self.exhausted = self.items.len() < PAGE_SIZE;
        true
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }

    /// A filtered view is a single fresh load and never paginates
    pub fn can_load_more(&self) -> bool {
        !self.exhausted && !self.is_filtered()
    }

    /// Page the row-count heuristic would ask for: `ceil(rows / 10) + 1`
    pub fn legacy_next_page(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE) + 1
    }
}

#[cfg(target_arch = "wasm32")]
fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn log_warn(_message: &str) {}
