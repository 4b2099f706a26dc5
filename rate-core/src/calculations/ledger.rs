//! Income and expense tracking.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::validation::ValidationError;
use crate::{NewTransaction, Transaction, TransactionKind};

/// Category used in summaries for transactions filed without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Errors returned by the [`Ledger`] totals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A running total left the range a [`Decimal`] can hold.
    #[error("{0} total is too large to calculate")]
    Overflow(&'static str),
}

/// Checks a transaction before it is recorded.
///
/// # Errors
///
/// Returns [`ValidationError`] if the amount is not positive or the category
/// does not belong to the transaction's kind.
pub fn validate_transaction(transaction: &NewTransaction) -> Result<(), ValidationError> {
    let mut errors = ValidationError::new();

    if transaction.amount <= Decimal::ZERO {
        errors.push("amount", "Amount must be greater than 0");
    }
    if let Some(category) = &transaction.category {
        let allowed = transaction.kind.categories();
        if !allowed.contains(&category.as_str()) {
            errors.push(
                "category",
                format!(
                    "Category '{category}' is not valid for {}; expected one of: {}",
                    transaction.kind,
                    allowed.join(", ")
                ),
            );
        }
    }

    errors.into_result()
}

/// Criteria for [`Ledger::filter`]. Unset fields match everything; date
/// bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(
        &self,
        transaction: &Transaction,
    ) -> bool {
        self.kind.is_none_or(|kind| transaction.kind == kind)
            && self
                .category
                .as_ref()
                .is_none_or(|category| transaction.category.as_ref() == Some(category))
            && self.from.is_none_or(|from| transaction.date >= from)
            && self.to.is_none_or(|to| transaction.date <= to)
    }
}

/// Totals for a set of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
    pub transaction_count: usize,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub expenses_by_category: BTreeMap<String, Decimal>,
}

/// Read-only view over recorded transactions.
#[derive(Debug, Clone, Copy)]
pub struct Ledger<'a> {
    transactions: &'a [Transaction],
}

impl<'a> Ledger<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    pub fn total_income(&self) -> Result<Decimal, LedgerError> {
        self.total_for(TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> Result<Decimal, LedgerError> {
        self.total_for(TransactionKind::Expense)
    }

    /// Income minus expenses. May be negative.
    pub fn net(&self) -> Result<Decimal, LedgerError> {
        self.total_income()?
            .checked_sub(self.total_expenses()?)
            .ok_or(LedgerError::Overflow("net"))
    }

    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        Ok(LedgerSummary {
            total_income: self.total_income()?,
            total_expenses: self.total_expenses()?,
            net: self.net()?,
            transaction_count: self.transactions.len(),
            income_by_category: self.totals_by_category(TransactionKind::Income)?,
            expenses_by_category: self.totals_by_category(TransactionKind::Expense)?,
        })
    }

    /// Transactions matching `filter`, in recorded order.
    pub fn filter(
        &self,
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    /// Sum per category for one kind, sorted by category name.
    pub fn totals_by_category(
        &self,
        kind: TransactionKind,
    ) -> Result<BTreeMap<String, Decimal>, LedgerError> {
        let mut totals = BTreeMap::new();
        for transaction in self.of_kind(kind) {
            let category = transaction
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            let total = totals.entry(category).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(transaction.amount)
                .ok_or(LedgerError::Overflow(kind.as_str()))?;
        }
        Ok(totals)
    }

    fn total_for(
        &self,
        kind: TransactionKind,
    ) -> Result<Decimal, LedgerError> {
        self.of_kind(kind)
            .try_fold(Decimal::ZERO, |total, t| total.checked_add(t.amount))
            .ok_or(LedgerError::Overflow(kind.as_str()))
    }

    fn of_kind(
        &self,
        kind: TransactionKind,
    ) -> impl Iterator<Item = &'a Transaction> {
        self.transactions.iter().filter(move |t| t.kind == kind)
    }
}
