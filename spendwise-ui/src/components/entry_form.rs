//! Entry Form Component
//!
//! New-entry form inside the `#input-section` modal.

use leptos::*;

use crate::api::EntryForm;
use crate::state::actions;
use crate::state::global::GlobalState;
use crate::state::modal::ModalKind;

use super::Modal;

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn empty_form() -> EntryForm {
    EntryForm {
        date: today(),
        entry_type: "expense".to_string(),
        ..Default::default()
    }
}

#[component]
pub fn EntryFormModal() -> impl IntoView {
    view! {
        <Modal kind=ModalKind::NewEntry title="New Entry">
            <EntryFormFields />
        </Modal>
    }
}

#[component]
fn EntryFormFields() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let form = create_rw_signal(empty_form());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let data = form.get_untracked();
        spawn_local(async move {
            actions::submit_entry(state, data, move || form.set(empty_form())).await;
            set_submitting.set(false);
        });
    };

    view! {
        <form id="expenseForm" on:submit=on_submit class="space-y-4">
            <FormField label="Date">
                <input
                    type="date"
                    name="date"
                    required
                    prop:value=move || form.with(|f| f.date.clone())
                    on:input=move |ev| form.update(|f| f.date = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <FormField label="Description">
                <input
                    type="text"
                    name="description"
                    required
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <FormField label="Amount">
                <input
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0"
                    required
                    prop:value=move || form.with(|f| f.amount.clone())
                    on:input=move |ev| form.update(|f| f.amount = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <FormField label="Type">
                <select
                    name="type"
                    prop:value=move || form.with(|f| f.entry_type.clone())
                    on:change=move |ev| form.update(|f| f.entry_type = event_target_value(&ev))
                    class=INPUT_CLASS
                >
                    <option value="expense">"Expense"</option>
                    <option value="income">"Income"</option>
                </select>
            </FormField>

            <FormField label="Category">
                <input
                    type="text"
                    name="category"
                    required
                    prop:value=move || form.with(|f| f.category.clone())
                    on:input=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </FormField>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Saving..." } else { "Add Entry" }}
            </button>
        </form>
    }
}

pub(crate) const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-2 text-white \
     border border-gray-600 focus:border-primary-500 focus:outline-none";

#[component]
pub(crate) fn FormField(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            {children()}
        </div>
    }
}
