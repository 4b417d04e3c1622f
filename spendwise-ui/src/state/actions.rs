//! Dashboard Actions
//!
//! Request/render cycles triggered by the components. Read failures are
//! logged to the console and leave the page as it was; a failed submit
//! shows a generic alert.

use leptos::*;

use super::entries::EntryListAction;
use super::global::{GlobalState, EntryFilter, ADD_FAILURE_MESSAGE, ADD_SUCCESS_MESSAGE};
use crate::api::{self, EntryForm};

fn log_error(context: &str, error: &str) {
    web_sys::console::error_1(&format!("{}: {}", context, error).into());
}

/// Summary and first page, requested concurrently
pub fn initialize(state: GlobalState) {
    spawn_local(refresh_summary(state));
    spawn_local(async move {
        load_entries(state, 1).await;
    });
}

pub async fn refresh_summary(state: GlobalState) {
    match api::fetch_summary().await {
        Ok(totals) => state.summary.set(Some(totals)),
        Err(e) => log_error("Failed to load summary", &e),
    }
}

/// Unfiltered page; page 1 replaces the list, later pages append
pub async fn load_entries(state: GlobalState, page: usize) -> bool {
    state.loading.set(true);
    let result = api::fetch_entries(page, &EntryFilter::default()).await;
    state.loading.set(false);

    match result {
        Ok(entries) => state.update_entries(EntryListAction::PageLoaded { page, entries }),
        Err(e) => {
            log_error(&format!("Failed to load page {}", page), &e);
            false
        }
    }
}

pub async fn load_more(state: GlobalState) {
    let (page, legacy, can_load) = state.entries.with_untracked(|list| {
        (list.next_page, list.legacy_next_page(), list.can_load_more())
    });
    if !can_load {
        return;
    }
    if legacy != page {
        web_sys::console::debug_1(
            &format!("Row-count cursor drift: page {} vs legacy {}", page, legacy).into(),
        );
    }
    load_entries(state, page).await;
}

/// Follow-up of a submit, run in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStep {
    Alert(&'static str),
    ResetForm,
    ReloadFirstPage,
    RefreshSummary,
}

const SUBMITTED: [SubmitStep; 4] = [
    SubmitStep::Alert(ADD_SUCCESS_MESSAGE),
    SubmitStep::ResetForm,
    SubmitStep::ReloadFirstPage,
    SubmitStep::RefreshSummary,
];

const REJECTED: [SubmitStep; 1] = [SubmitStep::Alert(ADD_FAILURE_MESSAGE)];

pub fn steps_after_submit(succeeded: bool) -> &'static [SubmitStep] {
    if succeeded {
        &SUBMITTED
    } else {
        &REJECTED
    }
}

/// Post the form, then alert, reset, reload page 1 and the totals
pub async fn submit_entry(state: GlobalState, form: EntryForm, reset_form: impl FnOnce()) -> bool {
    let succeeded = match api::submit_entry(&form).await {
        Ok(response) => {
            web_sys::console::log_1(&format!("Entry {} added: {}", response.id, response.message).into());
            true
        }
        Err(e) => {
            log_error("Failed to add entry", &e);
            false
        }
    };

    let mut reset_form = Some(reset_form);
    for step in steps_after_submit(succeeded) {
        match *step {
            SubmitStep::Alert(message) => state.alert(message),
            SubmitStep::ResetForm => {
                if let Some(reset) = reset_form.take() {
                    reset();
                }
            }
            SubmitStep::ReloadFirstPage => {
                load_entries(state, 1).await;
            }
            SubmitStep::RefreshSummary => refresh_summary(state).await,
        }
    }
    succeeded
}

/// Replace the list with the matching entries; no pagination follows
pub async fn apply_filter(state: GlobalState, filter: EntryFilter) {
    match api::fetch_entries(1, &filter).await {
        Ok(entries) => {
            state.update_entries(EntryListAction::FilterApplied { filter, entries });
        }
        Err(e) => log_error("Failed to apply filter", &e),
    }
}

/// Back to the plain list; the filtered rows stay if the reload fails
pub async fn clear_filter(state: GlobalState) {
    load_entries(state, 1).await;
}

pub fn export_csv(state: GlobalState) {
    state.navigate(&api::export_url());
}
