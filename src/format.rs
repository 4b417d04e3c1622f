//! Display formatting for amounts and entry rows

use crate::model::{round_cents, Entry};

/// Default currency symbol prefixed to every rendered amount
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Format a total with a fixed two decimal places: `₹1234.50`
///
/// Halves of a cent round away from zero (`0.125` shows as `0.13`), which
/// plain `{:.2}` would round to even.
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, round_cents(value))
}

/// Format an entry amount with its sign: `-₹50`, `+₹12.5`
///
/// The amount is shown as the raw number the server returned, without
/// padding to two decimals.
pub fn format_signed_amount(symbol: &str, entry: &Entry) -> String {
    format!("{}{}{}", entry.entry_type.sign(), symbol, entry.amount)
}

/// Left-hand label of an entry row: `2024-01-05: Lunch`
pub fn format_entry_label(entry: &Entry) -> String {
    format!("{}: {}", entry.date, entry.description)
}
