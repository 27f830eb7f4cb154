use rust_decimal::Decimal;

use crate::error::{ReportError, Result};
use crate::models::{Category, ReportTotals, Transaction};

/// Everything one report run derives from its transactions. Owned by the
/// caller and rebuilt per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub transactions: Vec<Transaction>,
    pub credits: Vec<Category>,
    pub debits: Vec<Category>,
    pub totals: ReportTotals,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// "March 2024" from the first transaction seen, "???" when there is none.
    pub fn period_label(&self) -> String {
        match self.transactions.first() {
            Some(t) => t.date.format("%B %Y").to_string(),
            None => "???".to_string(),
        }
    }
}

fn categorize(categories: &mut Vec<Category>, txn: &Transaction) -> Result<()> {
    let idx = match categories.iter().position(|c| c.name == txn.category) {
        Some(i) => i,
        None => {
            categories.push(Category::new(&txn.category));
            categories.len() - 1
        }
    };
    categories[idx].add(txn.clone())
}

pub fn sum_totals(categories: &[Category]) -> Result<Decimal> {
    categories.iter().try_fold(Decimal::ZERO, |acc, c| {
        acc.checked_add(c.total)
            .ok_or_else(|| ReportError::Overflow(c.name.clone()))
    })
}

/// Split transactions by sign into credit and debit trees and total them.
/// A total that leaves the `Decimal` range is an `Overflow` error.
pub fn aggregate(transactions: Vec<Transaction>) -> Result<Summary> {
    let mut credits = Vec::new();
    let mut debits = Vec::new();

    for txn in &transactions {
        if txn.is_credit() {
            categorize(&mut credits, txn)?;
        } else {
            categorize(&mut debits, txn)?;
        }
    }

    let total_inflows = sum_totals(&credits)?;
    let total_outflows = sum_totals(&debits)?;
    let net_total = total_inflows
        .checked_add(total_outflows)
        .ok_or_else(|| ReportError::Overflow("net total".to_string()))?;

    Ok(Summary {
        transactions,
        credits,
        debits,
        totals: ReportTotals {
            total_inflows,
            total_outflows,
            net_total,
        },
    })
}
