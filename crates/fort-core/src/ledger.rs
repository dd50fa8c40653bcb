//! # Transaction Ledgers and Daily Series
//!
//! A ledger is the raw transaction history of one user: dated signed
//! amounts, positive for inflow and negative for outflow. Feature extraction
//! never reads entries directly; it works on a [`DailySeries`], a zero-filled
//! window of per-day net amounts ending at the ledger's latest date.
//!
//! ## CSV Format
//!
//! ```text
//! date,amount
//! 2024-01-01,1500.00
//! 2024-01-03,-42.10
//! ```
//!
//! The header must name `date` and `amount` (any order, any case); other
//! columns are ignored. A time component after the date (`2024-01-01T09:30`
//! or `2024-01-01 09:30:00`) is truncated to the calendar day.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FortError;

/// One dated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Calendar day of the transaction.
    pub date: NaiveDate,
    /// Signed amount: positive is inflow, negative is outflow.
    pub amount: f64,
}

impl LedgerEntry {
    /// Create an entry.
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// A non-empty, read-only set of ledger entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    max_date: NaiveDate,
}

impl Ledger {
    /// Build a ledger from entries in any order.
    ///
    /// # Errors
    ///
    /// Fails with [`FortError::Ledger`] if `entries` is empty or an amount is
    /// not finite.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Result<Self, FortError> {
        if let Some(bad) = entries.iter().find(|e| !e.amount.is_finite()) {
            return Err(FortError::Ledger(format!(
                "non-finite amount on {}",
                bad.date
            )));
        }
        let max_date = entries
            .iter()
            .map(|e| e.date)
            .max()
            .ok_or_else(|| FortError::Ledger("ledger contains no entries".to_string()))?;
        Ok(Self { entries, max_date })
    }

    /// Parse a ledger from CSV text.
    ///
    /// Quoted fields follow RFC 4180, so a memo such as `"rent, march"`
    /// stays one field. Errors name the 1-based line of the offending row.
    pub fn parse_csv(text: &str) -> Result<Self, FortError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(&e))?
            .iter()
            .map(str::to_ascii_lowercase)
            .collect();
        if columns.iter().all(String::is_empty) {
            return Err(FortError::Ledger("ledger is empty".to_string()));
        }
        let date_idx = column_index(&columns, "date")?;
        let amount_idx = column_index(&columns, "amount")?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(&e))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line_no = record.position().map_or(0, csv::Position::line);
            let date_field = record.get(date_idx).unwrap_or_default();
            let amount_field = record.get(amount_idx).unwrap_or_default();
            let date = parse_date(date_field).ok_or_else(|| {
                FortError::Ledger(format!("line {line_no}: invalid date {date_field:?}"))
            })?;
            let amount = amount_field
                .parse::<f64>()
                .ok()
                .filter(|a| a.is_finite())
                .ok_or_else(|| {
                    FortError::Ledger(format!("line {line_no}: invalid amount {amount_field:?}"))
                })?;
            entries.push(LedgerEntry { date, amount });
        }
        Self::from_entries(entries)
    }

    /// All entries, in input order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a ledger has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest transaction date.
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// Earliest transaction date.
    pub fn min_date(&self) -> NaiveDate {
        self.entries
            .iter()
            .map(|e| e.date)
            .min()
            .unwrap_or(self.max_date)
    }

    /// Aggregate into a zero-filled daily series of `window_days` days ending
    /// at [`Ledger::max_date`]. Same-day amounts are summed; entries before
    /// the window are dropped.
    ///
    /// # Errors
    ///
    /// Fails with [`FortError::Format`] if `window_days` is zero.
    pub fn daily_series(&self, window_days: usize) -> Result<DailySeries, FortError> {
        if window_days == 0 {
            return Err(FortError::Format("window must be at least one day".to_string()));
        }
        let span = i64::try_from(window_days - 1)
            .map_err(|_| FortError::Format(format!("window of {window_days} days is too large")))?;
        let start = self
            .max_date
            .checked_sub_signed(Duration::days(span))
            .ok_or_else(|| FortError::Format(format!("window of {window_days} days is too large")))?;

        let mut amounts = vec![0.0; window_days];
        for entry in &self.entries {
            let offset = (entry.date - start).num_days();
            if let Ok(idx) = usize::try_from(offset) {
                if let Some(slot) = amounts.get_mut(idx) {
                    *slot += entry.amount;
                }
            }
        }
        Ok(DailySeries { start, amounts })
    }
}

/// Per-day net amounts over consecutive calendar days.
///
/// # Invariants
///
/// - `amounts.len()` equals the window length it was built with.
/// - Day `i` is `start + i` days.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    amounts: Vec<f64>,
}

impl DailySeries {
    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    pub fn end(&self) -> NaiveDate {
        self.date_at(self.amounts.len().saturating_sub(1))
    }

    /// Net amount per day.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// True only for a zero-length series, which `daily_series` never builds.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Iterate `(date, net amount)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| (self.date_at(i), amount))
    }

    fn date_at(&self, idx: usize) -> NaiveDate {
        self.start + Duration::days(idx as i64)
    }
}

fn csv_error(err: &csv::Error) -> FortError {
    match err.position() {
        Some(pos) => FortError::Ledger(format!("line {}: {err}", pos.line())),
        None => FortError::Ledger(format!("unreadable CSV: {err}")),
    }
}

fn column_index(columns: &[String], name: &str) -> Result<usize, FortError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| FortError::Ledger(format!("missing {name:?} column in header")))
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    let day = field.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
