//! Spendwise Expense Store
//!
//! SQLite-backed persistence for income and expense entries:
//!
//! - **expenses**: The `ExpenseStore` with insert, paginated listing,
//!   deletion, summary totals and full export
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use spendwise::store::{ExpenseStore, ListQuery, NewExpense};
//! use spendwise::model::EntryType;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ExpenseStore::open("./expenses.db")?;
//!
//!     let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//!     store.add(&NewExpense::new(50.0, "Lunch", "food", EntryType::Expense, date))?;
//!
//!     let first_page = store.list(&ListQuery::page(1))?;
//!     let totals = store.summary()?;
//!     println!("{} entries, net {}", first_page.len(), totals.net_balance);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod expenses;

pub use error::{StoreError, StoreResult};
pub use expenses::{ExpenseStore, ListQuery, NewExpense, MAX_PAGE_LIMIT};
