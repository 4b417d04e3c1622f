//! Summary Card Component
//!
//! Total expense, total income and net balance.

use leptos::*;

use crate::state::global::{format_currency, GlobalState, SummaryTotals};

/// The three summary cards
#[component]
pub fn SummaryCards() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Until the first summary arrives the cards show a dash
    let amount = move |pick: fn(&SummaryTotals) -> f64| {
        Signal::derive(move || {
            state
                .summary
                .with(|s| s.as_ref().map(|totals| format_currency(pick(totals))))
                .unwrap_or_else(|| "—".to_string())
        })
    };

    view! {
        <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <SummaryCard
                id="totalExpense"
                label="Total Expense"
                value=amount(|t| t.total_expense)
                accent="text-red-400"
            />
            <SummaryCard
                id="totalIncome"
                label="Total Income"
                value=amount(|t| t.total_income)
                accent="text-green-400"
            />
            <SummaryCard
                id="netBalance"
                label="Net Balance"
                value=amount(|t| t.net_balance)
                accent="text-white"
            />
        </section>
    }
}

#[component]
fn SummaryCard(
    id: &'static str,
    label: &'static str,
    value: Signal<String>,
    accent: &'static str,
) -> impl IntoView {
    view! {
        <div id=id class="summary-card bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{label}</span>
            <div class=format!("amount text-3xl font-bold mt-2 {}", accent)>
                {move || value.get()}
            </div>
        </div>
    }
}
