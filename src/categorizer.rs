use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::models::{Transaction, DEFAULT_SUBCATEGORY};

pub const COL_DATE: usize = 3;
pub const COL_PAYEE: usize = 5;
pub const COL_CATEGORY: usize = 6;
pub const COL_AMOUNT: usize = 9;
pub const COL_ACCOUNT: usize = 10;
pub const COL_NOTES: usize = 11;

const SUMMARY_MARKERS: &[&str] = &["Total Inflows:", "Total Outflows:", "Net Total:"];

/// Outcome of looking at one parsed row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Transfer,
    Summary,
    Transaction(Transaction),
    Ignored,
}

/// M/D/YYYY or MM/DD/YYYY by shape only; calendar validity is checked later.
pub fn is_date(s: &str) -> bool {
    if s.len() < 8 || s.len() > 10 {
        return false;
    }
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 {
        return false;
    }
    if parts[0].is_empty() || parts[0].len() > 2 {
        return false;
    }
    if parts[1].is_empty() || parts[1].len() > 2 {
        return false;
    }
    parts[2].len() == 4
}

fn parse_date(row: usize, raw: &str) -> Result<NaiveDate> {
    let invalid = || ReportError::InvalidDate {
        row,
        value: raw.to_string(),
    };
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let m: u32 = parts[0].parse().map_err(|_| invalid())?;
    let d: u32 = parts[1].parse().map_err(|_| invalid())?;
    let y: i32 = parts[2].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}

/// Commas are thousands separators. Underscores are rejected even though
/// `Decimal::from_str` would skip them.
fn parse_amount(row: usize, raw: &str) -> Result<Decimal> {
    let invalid = || ReportError::InvalidAmount {
        row,
        value: raw.to_string(),
    };
    if raw.contains('_') {
        return Err(invalid());
    }
    let cleaned = raw.trim().replace(',', "");
    Decimal::from_str(&cleaned).map_err(|_| invalid())
}

fn field(row: &[String], idx: usize, pos: usize) -> Result<&str> {
    row.get(idx)
        .map(String::as_str)
        .ok_or(ReportError::MissingField { row: pos, column: idx })
}

/// Classify a row; the first matching rule wins. Rows that are neither
/// transfers, source-side totals nor dated transactions are ignored.
pub fn classify_row(row: &[String], pos: usize) -> Result<RowKind> {
    if row
        .get(COL_CATEGORY)
        .is_some_and(|c| c.contains("Transfer:"))
    {
        return Ok(RowKind::Transfer);
    }

    if row
        .first()
        .is_some_and(|f| SUMMARY_MARKERS.iter().any(|m| f.contains(m)))
    {
        return Ok(RowKind::Summary);
    }

    if row.get(COL_DATE).is_some_and(|d| is_date(d)) {
        let category_raw = field(row, COL_CATEGORY, pos)?;
        let mut parts = category_raw.split(':');
        let category = parts.next().unwrap_or_default().trim().to_string();
        let sub_category = parts
            .next()
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SUBCATEGORY.to_string());

        let txn = Transaction {
            date: parse_date(pos, field(row, COL_DATE, pos)?.trim())?,
            payee: field(row, COL_PAYEE, pos)?.trim().to_string(),
            category,
            sub_category,
            amount: parse_amount(pos, field(row, COL_AMOUNT, pos)?)?,
            account: field(row, COL_ACCOUNT, pos)?.trim().to_string(),
            notes: field(row, COL_NOTES, pos)?.trim().to_string(),
        };
        return Ok(RowKind::Transaction(txn));
    }

    Ok(RowKind::Ignored)
}

/// Turn every parsed row into transactions, in file order.
pub fn collect_transactions(rows: &[Vec<String>]) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for (pos, row) in rows.iter().enumerate() {
        match classify_row(row, pos)? {
            RowKind::Transaction(txn) => transactions.push(txn),
            RowKind::Transfer => debug!(row = pos, "skipping transfer"),
            RowKind::Summary => debug!(row = pos, "skipping source total"),
            RowKind::Ignored => debug!(row = pos, "ignoring non-transaction row"),
        }
    }
    Ok(transactions)
}
