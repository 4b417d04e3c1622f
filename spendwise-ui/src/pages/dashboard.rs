//! Dashboard Page
//!
//! Summary totals, the entry list and the two modals.

use leptos::*;

use crate::components::{EntryFormModal, EntryList, FilterModal, SummaryCards};
use crate::state::actions;
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch initial data on mount
    create_effect(move |_| actions::initialize(state));

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Expense Tracker"</h1>
                <p class="text-gray-400 mt-1">"Where the money went"</p>
            </div>

            <SummaryCards />
            <EntryList />

            <EntryFormModal />
            <FilterModal />
        </div>
    }
}
