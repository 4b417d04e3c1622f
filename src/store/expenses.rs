//! SQLite expense table
//!
//! One table, one row per entry. Dates are stored as `YYYY-MM-DD` text so
//! that lexical comparison matches chronological order.

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::{StoreError, StoreResult};
use crate::model::{Entry, EntryType, Filter, SummaryTotals, DATE_FORMAT, DEFAULT_PAGE_SIZE};

/// Upper bound on `limit` for a single list request
pub const MAX_PAGE_LIMIT: usize = 500;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS expenses (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        amount      REAL NOT NULL,
        description TEXT NOT NULL,
        category    TEXT NOT NULL,
        type        TEXT NOT NULL,
        date        TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
    CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);
";

/// A validated entry ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub entry_type: EntryType,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        entry_type: EntryType,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category: category.into(),
            entry_type,
            date,
        }
    }
}

/// Page and filter selection for `ExpenseStore::list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page index; 0 is treated as 1
    pub page: usize,
    /// Rows per page; 0 falls back to the default page size
    pub limit: usize,
    pub filter: Filter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            filter: Filter::default(),
        }
    }
}

impl ListQuery {
    /// Query for one page with the default page size
    pub fn page(page: usize) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Builder method: rows per page
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder method: filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    fn effective_limit(&self) -> usize {
        match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_LIMIT),
        }
    }

    /// Rows to skip; `None` when the page lies beyond anything SQLite can address
    fn offset(&self) -> Option<i64> {
        (self.page.max(1) - 1)
            .checked_mul(self.effective_limit())
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

/// SQLite-backed expense store
///
/// Cloning is cheap; all clones share one connection.
#[derive(Clone)]
pub struct ExpenseStore {
    conn: Arc<Mutex<Connection>>,
}

impl ExpenseStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = ?path, "Opened expense database");
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    /// Insert an entry and return its id
    pub fn add(&self, expense: &NewExpense) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO expenses (amount, description, category, type, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.amount,
                expense.description,
                expense.category,
                expense.entry_type.as_str(),
                expense.date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, amount = expense.amount, kind = %expense.entry_type, "Inserted entry");
        Ok(id)
    }

    /// One page of entries, newest date first
    pub fn list(&self, query: &ListQuery) -> StoreResult<Vec<Entry>> {
        let Some(offset) = query.offset() else {
            tracing::debug!(page = query.page, "Page beyond addressable range");
            return Ok(Vec::new());
        };

        let mut sql = String::from(
            "SELECT id, amount, description, category, type, date FROM expenses WHERE 1=1",
        );
        let mut args: Vec<String> = Vec::new();

        if let Some(start) = query.filter.start_date {
            sql.push_str(" AND date >= ?");
            args.push(start.format(DATE_FORMAT).to_string());
        }
        if let Some(end) = query.filter.end_date {
            sql.push_str(" AND date <= ?");
            args.push(end.format(DATE_FORMAT).to_string());
        }
        if let Some(category) = &query.filter.category {
            sql.push_str(" AND category = ?");
            args.push(category.clone());
        }

        sql.push_str(&format!(
            " ORDER BY date DESC, id DESC LIMIT {} OFFSET {}",
            query.effective_limit(),
            offset
        ));

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_entry).collect()
    }

    /// Every entry in insertion order, for export
    pub fn all(&self) -> StoreResult<Vec<Entry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, description, category, type, date FROM expenses ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_entry).collect()
    }

    /// Delete an entry; returns false if no row had that id
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    /// Totals over all entries; net balance is income minus expense
    pub fn summary(&self) -> StoreResult<SummaryTotals> {
        let conn = self.lock()?;
        let (expense, income): (f64, f64) = conn.query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0.0),
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount END), 0.0)
             FROM expenses",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(SummaryTotals::from_sums(expense, income))
    }

    /// Number of stored entries
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

type RawRow = (i64, f64, String, String, String, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_entry((id, amount, description, category, kind, date): RawRow) -> StoreResult<Entry> {
    let entry_type = kind
        .parse::<EntryType>()
        .map_err(|reason| StoreError::CorruptRow { id, reason })?;

    Ok(Entry::new(date, description, amount, entry_type)
        .id(id)
        .category(category))
}
