//! Terminal rendering for the view controller

use std::io::Write;

use super::{EntryRow, ListChange, SummaryDisplay, View};

/// `View` that prints to any writer (stdout for the CLI)
pub struct TerminalView<W: Write> {
    out: W,
    pending_download: Option<String>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pending_download: None,
        }
    }

    /// URL the controller asked to navigate to, if any
    ///
    /// A terminal cannot follow a navigation, so the caller downloads it.
    pub fn take_download(&mut self) -> Option<String> {
        self.pending_download.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn row(&mut self, row: &EntryRow) {
        let id = row.id.map(|id| format!("#{}", id)).unwrap_or_default();
        let text = format!("{:>6} {:<48} {:>14}", id, row.label, row.amount);
        self.line(&text);
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render_summary(&mut self, summary: &SummaryDisplay) {
        self.line(&format!("{:<14}{:>16}", "Total expense", summary.total_expense));
        self.line(&format!("{:<14}{:>16}", "Total income", summary.total_income));
        self.line(&format!("{:<14}{:>16}", "Net balance", summary.net_balance));
    }

    fn render_entries(&mut self, rows: &[EntryRow], change: ListChange) {
        let start = match change {
            ListChange::Replaced => {
                if rows.is_empty() {
                    self.line("No entries.");
                    return;
                }
                self.line(&format!("{:>6} {:<48} {:>14}", "ID", "Entry", "Amount"));
                self.line(&"-".repeat(70));
                0
            }
            ListChange::Appended { from } => from,
            ListChange::Ignored => return,
        };

        for row in rows.iter().skip(start) {
            self.row(row);
        }
        self.line(&format!("({} shown)", rows.len()));
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }

    fn reset_form(&mut self) {
        tracing::trace!("Form reset");
    }

    fn navigate(&mut self, url: &str) {
        self.pending_download = Some(url.to_string());
    }
}
