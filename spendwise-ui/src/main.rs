//! Spendwise Dashboard
//!
//! Browser front end for the Spendwise expense tracker, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Summary totals
//! - Paginated entry list with "Load More"
//! - New-entry and filter modals
//! - CSV export and a dark theme toggle
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application. All state lives in
//! signals (`state::global`); the entry list is an explicit model updated
//! through a reducer (`state::entries`). The API is reached over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
