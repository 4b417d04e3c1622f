//! Filter Form Component
//!
//! Date range and category inside the `#filter-section` modal.

use leptos::*;

use crate::state::actions;
use crate::state::global::{EntryFilter, GlobalState};
use crate::state::modal::ModalKind;

use super::entry_form::{FormField, INPUT_CLASS};
use super::Modal;

#[component]
pub fn FilterModal() -> impl IntoView {
    view! {
        <Modal kind=ModalKind::Filter title="Filter Entries">
            <FilterFields />
        </Modal>
    }
}

#[component]
fn FilterFields() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Start from the active filter so reopening shows what is applied
    let filter = create_rw_signal(state.entries.with_untracked(|list| list.filter.clone()));

    let on_apply = move |_| {
        let data = filter.get_untracked();
        state.modal.update(|m| m.close());
        spawn_local(actions::apply_filter(state, data));
    };

    let on_clear = move |_| {
        filter.set(EntryFilter::default());
        state.modal.update(|m| m.close());
        spawn_local(actions::clear_filter(state));
    };

    view! {
        <div class="space-y-4">
            <FormField label="Start date">
                <input
                    type="date"
                    id="startDate"
                    prop:value=move || filter.with(|f| f.start_date.clone())
                    on:input=move |ev| filter.update(|f| f.start_date = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <FormField label="End date">
                <input
                    type="date"
                    id="endDate"
                    prop:value=move || filter.with(|f| f.end_date.clone())
                    on:input=move |ev| filter.update(|f| f.end_date = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <FormField label="Category">
                <input
                    type="text"
                    id="filterCategory"
                    prop:value=move || filter.with(|f| f.category.clone())
                    on:input=move |ev| filter.update(|f| f.category = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <div class="flex gap-2">
                <button
                    type="button"
                    id="applyFilter"
                    on:click=on_apply
                    class="flex-1 bg-primary-600 hover:bg-primary-700 rounded-lg py-2 font-semibold transition-colors"
                >
                    "Apply Filter"
                </button>
                <button
                    type="button"
                    on:click=on_clear
                    class="flex-1 bg-gray-700 hover:bg-gray-600 rounded-lg py-2 transition-colors"
                >
                    "Clear"
                </button>
            </div>
        </div>
    }
}
