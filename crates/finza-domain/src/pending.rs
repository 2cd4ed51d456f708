//! Queued writes awaiting delivery to the remote ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::EntryKind, recurring::RecurringRule, transaction::Transaction};

/// The entry a pending write will create remotely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "target", content = "entry")]
pub enum PendingPayload {
    Transaction(Transaction),
    Recurring(RecurringRule),
}

impl PendingPayload {
    pub fn kind(&self) -> EntryKind {
        match self {
            PendingPayload::Transaction(_) => EntryKind::Transaction,
            PendingPayload::Recurring(_) => EntryKind::Recurring,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            PendingPayload::Transaction(txn) => &txn.description,
            PendingPayload::Recurring(rule) => &rule.description,
        }
    }
}

/// One unsent write in a user's FIFO queue. `local_id` identifies the queue
/// slot for the drain's end-of-run rewrite; it is never sent to the remote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingWrite {
    #[serde(default = "PendingWrite::fresh_local_id")]
    pub local_id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub payload: PendingPayload,
}

impl PendingWrite {
    pub fn for_transaction(transaction: Transaction, queued_at: DateTime<Utc>) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            queued_at,
            payload: PendingPayload::Transaction(transaction),
        }
    }

    pub fn for_recurring(rule: RecurringRule, queued_at: DateTime<Utc>) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            queued_at,
            payload: PendingPayload::Recurring(rule),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.payload.kind()
    }

    fn fresh_local_id() -> Uuid {
        Uuid::new_v4()
    }
}
