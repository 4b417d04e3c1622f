//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod entry_form;
pub mod entry_list;
pub mod filter_form;
pub mod modal;
pub mod nav;
pub mod summary_card;
pub mod toolbar;

pub use entry_form::EntryFormModal;
pub use entry_list::EntryList;
pub use filter_form::FilterModal;
pub use modal::Modal;
pub use nav::Nav;
pub use summary_card::SummaryCards;
pub use toolbar::Toolbar;
