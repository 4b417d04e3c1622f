//! Modal Component
//!
//! Overlay with a dialog; the close button or a click on the overlay
//! hides it.

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::modal::ModalKind;

#[component]
pub fn Modal(
    kind: ModalKind,
    title: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let children = store_value(children);

    view! {
        <Show when=move || state.modal.with(|m| m.is_open(kind))>
            <div
                id=kind.element_id()
                class="modal fixed inset-0 z-40 bg-black/60 flex items-center justify-center"
                on:click=move |_| state.modal.update(|m| m.click(true))
            >
                <div
                    class="modal-content bg-gray-800 rounded-xl p-6 w-full max-w-md shadow-xl"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-semibold">{title}</h2>
                        <button
                            type="button"
                            class="close text-gray-400 hover:text-white text-2xl leading-none"
                            on:click=move |_| state.modal.update(|m| m.close())
                        >
                            "×"
                        </button>
                    </div>
                    {children.with_value(|children| children())}
                </div>
            </div>
        </Show>
    }
}
