//! Navigation Component
//!
//! Header bar with the brand and the toolbar.

use leptos::*;
use leptos_router::*;

use super::Toolbar;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"💰"</span>
                        <span class="text-xl font-bold">"Spendwise"</span>
                    </A>

                    <Toolbar />
                </div>
            </div>
        </nav>
    }
}
