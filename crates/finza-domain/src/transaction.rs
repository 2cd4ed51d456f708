//! Domain model for ledger transactions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single income or expense movement owned by one user. The remote ledger
/// assigns `id` on the first successful write; queued entries carry `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Category,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        kind: TransactionType,
        category: Category,
        date: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            amount,
            description: description.into(),
            kind,
            category,
            date,
            timestamp,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
