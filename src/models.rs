use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{ReportError, Result};

/// Subcategory used when the category field has no `:` segment.
pub const DEFAULT_SUBCATEGORY: &str = "Other";

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub payee: String,
    pub category: String,
    pub sub_category: String,
    pub amount: Decimal,
    pub account: String,
    pub notes: String,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.amount >= Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subcategory {
    pub name: String,
    pub total: Decimal,
    pub transactions: Vec<Transaction>,
}

/// A top-level grouping. Subcategories stay in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub total: Decimal,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total: Decimal::ZERO,
            subcategories: Vec::new(),
        }
    }

    /// Append a transaction to its subcategory, creating it on first sight,
    /// and bump both running totals. Nothing changes if either total would
    /// overflow.
    pub fn add(&mut self, txn: Transaction) -> Result<()> {
        let idx = match self
            .subcategories
            .iter()
            .position(|s| s.name == txn.sub_category)
        {
            Some(i) => i,
            None => {
                self.subcategories.push(Subcategory {
                    name: txn.sub_category.clone(),
                    total: Decimal::ZERO,
                    transactions: Vec::new(),
                });
                self.subcategories.len() - 1
            }
        };
        let overflow = || ReportError::Overflow(format!("{}:{}", txn.category, txn.sub_category));
        let sub = &mut self.subcategories[idx];
        let sub_total = sub.total.checked_add(txn.amount).ok_or_else(overflow)?;
        let total = self.total.checked_add(txn.amount).ok_or_else(overflow)?;
        sub.total = sub_total;
        self.total = total;
        sub.transactions.push(txn);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportTotals {
    pub total_inflows: Decimal,
    pub total_outflows: Decimal,
    pub net_total: Decimal,
}
