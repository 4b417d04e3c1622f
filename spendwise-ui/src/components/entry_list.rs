//! Entry List Component
//!
//! Rendered rows of the entry list model plus "Load more".

use leptos::*;

use crate::state::actions;
use crate::state::global::GlobalState;

#[component]
pub fn EntryList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let on_load_more = move |_| {
        spawn_local(actions::load_more(state));
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Recent Entries"</h2>
                {move || {
                    state.entries.with(|list| {
                        list.is_filtered().then(|| view! {
                            <span class="text-xs text-gray-400">"Filtered"</span>
                        })
                    })
                }}
            </div>

            <div id="entriesList" class="divide-y divide-gray-700">
                {move || {
                    state.entries.with(|list| {
                        if list.items.is_empty() {
                            view! {
                                <p class="text-gray-400 py-4">"No entries yet."</p>
                            }.into_view()
                        } else {
                            list.items.iter().map(|entry| {
                                let amount_class = if entry.is_expense() {
                                    "text-red-400"
                                } else {
                                    "text-green-400"
                                };
                                view! {
                                    <div class="entry-item flex justify-between py-2">
                                        <span>{entry.label()}</span>
                                        <span class=amount_class>{entry.signed_amount()}</span>
                                    </div>
                                }
                            }).collect_view()
                        }
                    })
                }}
            </div>

            <button
                id="loadMore"
                on:click=on_load_more
                disabled=move || state.loading.get() || state.entries.with(|l| !l.can_load_more())
                class="mt-4 w-full bg-gray-700 hover:bg-gray-600 disabled:opacity-50
                       disabled:cursor-not-allowed rounded-lg py-2 text-sm transition-colors"
            >
                {move || if state.loading.get() { "Loading..." } else { "Load More" }}
            </button>
        </section>
    }
}
