//! State Management
//!
//! Global signals plus the plain models they hold.

pub mod actions;
pub mod entries;
pub mod global;
pub mod modal;
pub mod theme;

pub use entries::{EntryList, EntryListAction};
pub use global::{provide_global_state, Entry, EntryFilter, GlobalState, SummaryTotals};
pub use modal::{ModalKind, ModalState};
pub use theme::Theme;
