use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::unknown_key::{UnknownKeyError, parse_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

const INCOME_CATEGORIES: &[&str] = &["Client Project", "Consultation", "Training", "Other"];
const EXPENSE_CATEGORIES: &[&str] = &[
    "Software",
    "Hardware",
    "Marketing",
    "Office",
    "Training",
    "Other",
];

impl TransactionKind {
    pub fn all() -> &'static [TransactionKind] {
        &[Self::Income, Self::Expense]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories a transaction of this kind may be filed under.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key("transaction type", s, Self::all(), TransactionKind::as_str)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// For recording new transactions (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn with_id(
        self,
        id: i64,
    ) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            date: self.date,
            category: self.category,
            description: self.description,
        }
    }
}
