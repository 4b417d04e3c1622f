//! Toolbar Component
//!
//! New entry, filter, export and theme buttons.

use leptos::*;

use crate::state::actions;
use crate::state::global::GlobalState;
use crate::state::modal::ModalKind;

#[component]
pub fn Toolbar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex flex-wrap gap-2">
            <ToolbarButton
                id="newEntryBtn"
                label="New Entry"
                primary=true
                on_click=move |_| state.modal.update(|m| m.open(ModalKind::NewEntry))
            />
            <ToolbarButton
                id="filterBtn"
                label="Filter"
                on_click=move |_| state.modal.update(|m| m.open(ModalKind::Filter))
            />
            <ToolbarButton
                id="exportCSV"
                label="Export CSV"
                on_click=move |_| actions::export_csv(state)
            />
            <ToolbarButton
                id="toggleTheme"
                label="Toggle Theme"
                on_click=move |_| state.toggle_theme()
            />
        </div>
    }
}

#[component]
fn ToolbarButton(
    id: &'static str,
    label: &'static str,
    #[prop(optional)]
    primary: bool,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    let class = if primary {
        "px-4 py-2 rounded-lg text-sm font-medium bg-primary-600 hover:bg-primary-700 transition-colors"
    } else {
        "px-4 py-2 rounded-lg text-sm font-medium bg-gray-700 hover:bg-gray-600 transition-colors"
    };

    view! {
        <button id=id type="button" on:click=on_click class=class>
            {label}
        </button>
    }
}
