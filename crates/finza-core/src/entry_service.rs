//! Write and read orchestration with offline fallback.
//!
//! Writes try the remote ledger first and queue locally on failure; reads
//! refresh the cache on success and fall back to cache-plus-queue when the
//! remote is unreachable.

use std::sync::Arc;

use chrono::NaiveDate;

use finza_domain::{
    Category, Frequency, PendingPayload, PendingWrite, RecurringRule, Transaction,
    TransactionType,
};

use crate::{ledger::LedgerClient, storage::CacheStore, time::Clock, CoreError};

/// Input for a new transaction before validation and identity assignment.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: f64,
    pub description: String,
    pub kind: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
}

/// Input for a new recurring rule.
#[derive(Debug, Clone)]
pub struct RecurringDraft {
    pub amount: f64,
    pub description: String,
    pub kind: TransactionType,
    pub category: Category,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

/// How a write landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Confirmed by the ledger; carries the assigned id.
    Synced { id: String },
    /// Ledger unreachable; queued locally for a later drain.
    SavedLocally,
}

pub struct EntryService {
    cache: Arc<dyn CacheStore>,
    ledger: Arc<dyn LedgerClient>,
    clock: Arc<dyn Clock>,
}

impl EntryService {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        ledger: Arc<dyn LedgerClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            ledger,
            clock,
        }
    }

    /// Validates and stores a new transaction. Remote failure is not an
    /// error here: the entry is queued and cached so it stays visible, and
    /// the outcome tells the caller to show the saved-locally notice.
    pub fn record_transaction(
        &self,
        user_id: &str,
        draft: TransactionDraft,
    ) -> Result<WriteOutcome, CoreError> {
        validate_amount(draft.amount)?;
        validate_description(&draft.description)?;

        let mut txn = Transaction::new(
            user_id,
            draft.amount,
            draft.description,
            draft.kind,
            draft.category,
            draft.date,
            self.clock.now(),
        );
        match self.ledger.create_transaction(user_id, &txn) {
            Ok(id) => {
                txn.id = Some(id.clone());
                self.append_cached_transaction(user_id, txn)?;
                Ok(WriteOutcome::Synced { id })
            }
            Err(err) => {
                tracing::warn!(user = %user_id, error = %err, "ledger write failed, queueing locally");
                self.cache.enqueue_pending(
                    user_id,
                    PendingWrite::for_transaction(txn.clone(), self.clock.now()),
                )?;
                self.append_cached_transaction(user_id, txn)?;
                Ok(WriteOutcome::SavedLocally)
            }
        }
    }

    /// Same contract as [`Self::record_transaction`], for recurring rules.
    pub fn record_recurring(
        &self,
        user_id: &str,
        draft: RecurringDraft,
    ) -> Result<WriteOutcome, CoreError> {
        validate_amount(draft.amount)?;
        validate_description(&draft.description)?;

        let mut rule = RecurringRule::new(
            user_id,
            draft.amount,
            draft.description,
            draft.kind,
            draft.category,
            draft.frequency,
            draft.start_date,
        );
        match self.ledger.create_recurring(user_id, &rule) {
            Ok(id) => {
                rule.id = Some(id.clone());
                self.append_cached_recurring(user_id, rule)?;
                Ok(WriteOutcome::Synced { id })
            }
            Err(err) => {
                tracing::warn!(user = %user_id, error = %err, "ledger write failed, queueing locally");
                self.cache.enqueue_pending(
                    user_id,
                    PendingWrite::for_recurring(rule.clone(), self.clock.now()),
                )?;
                self.append_cached_recurring(user_id, rule)?;
                Ok(WriteOutcome::SavedLocally)
            }
        }
    }

    /// Reads the user's transactions. A successful remote fetch overwrites
    /// the cache; on failure the cached list is merged additively with the
    /// queued payloads so unsynced writes never disappear from view.
    pub fn load_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        match self.ledger.read_transactions(user_id) {
            Ok(entries) => {
                self.cache.set_cached_transactions(user_id, &entries)?;
                Ok(entries)
            }
            Err(err) => {
                tracing::info!(user = %user_id, error = %err, "remote fetch failed, serving cached data");
                let mut entries = self.cache.cached_transactions(user_id)?;
                for write in self.cache.pending(user_id)? {
                    if let PendingPayload::Transaction(txn) = write.payload {
                        if !contains_transaction(&entries, &txn) {
                            entries.push(txn);
                        }
                    }
                }
                Ok(entries)
            }
        }
    }

    /// Same fallback shape as [`Self::load_transactions`], for rules.
    pub fn load_recurrings(&self, user_id: &str) -> Result<Vec<RecurringRule>, CoreError> {
        match self.ledger.read_recurrings(user_id) {
            Ok(entries) => {
                self.cache.set_cached_recurrings(user_id, &entries)?;
                Ok(entries)
            }
            Err(err) => {
                tracing::info!(user = %user_id, error = %err, "remote fetch failed, serving cached data");
                let mut entries = self.cache.cached_recurrings(user_id)?;
                for write in self.cache.pending(user_id)? {
                    if let PendingPayload::Recurring(rule) = write.payload {
                        if !contains_recurring(&entries, &rule) {
                            entries.push(rule);
                        }
                    }
                }
                Ok(entries)
            }
        }
    }

    /// Replaces an existing transaction. A missing remote entry is terminal
    /// for the operation; callers redirect to a safe view.
    pub fn update_transaction(
        &self,
        user_id: &str,
        id: &str,
        draft: TransactionDraft,
    ) -> Result<(), CoreError> {
        validate_amount(draft.amount)?;
        validate_description(&draft.description)?;

        let mut txn = Transaction::new(
            user_id,
            draft.amount,
            draft.description,
            draft.kind,
            draft.category,
            draft.date,
            self.clock.now(),
        );
        txn.id = Some(id.to_string());
        self.ledger.update_transaction(id, &txn)?;

        let mut cached = self.cache.cached_transactions(user_id)?;
        if let Some(slot) = cached
            .iter_mut()
            .find(|entry| entry.id.as_deref() == Some(id))
        {
            *slot = txn;
            self.cache.set_cached_transactions(user_id, &cached)?;
        }
        Ok(())
    }

    pub fn delete_transaction(&self, user_id: &str, id: &str) -> Result<(), CoreError> {
        self.ledger.delete_transaction(id)?;
        let mut cached = self.cache.cached_transactions(user_id)?;
        let before = cached.len();
        cached.retain(|entry| entry.id.as_deref() != Some(id));
        if cached.len() != before {
            self.cache.set_cached_transactions(user_id, &cached)?;
        }
        Ok(())
    }

    pub fn update_recurring(
        &self,
        user_id: &str,
        id: &str,
        draft: RecurringDraft,
    ) -> Result<(), CoreError> {
        validate_amount(draft.amount)?;
        validate_description(&draft.description)?;

        let mut rule = RecurringRule::new(
            user_id,
            draft.amount,
            draft.description,
            draft.kind,
            draft.category,
            draft.frequency,
            draft.start_date,
        );
        rule.id = Some(id.to_string());
        self.ledger.update_recurring(id, &rule)?;

        let mut cached = self.cache.cached_recurrings(user_id)?;
        if let Some(slot) = cached
            .iter_mut()
            .find(|entry| entry.id.as_deref() == Some(id))
        {
            *slot = rule;
            self.cache.set_cached_recurrings(user_id, &cached)?;
        }
        Ok(())
    }

    pub fn delete_recurring(&self, user_id: &str, id: &str) -> Result<(), CoreError> {
        self.ledger.delete_recurring(id)?;
        let mut cached = self.cache.cached_recurrings(user_id)?;
        let before = cached.len();
        cached.retain(|entry| entry.id.as_deref() != Some(id));
        if cached.len() != before {
            self.cache.set_cached_recurrings(user_id, &cached)?;
        }
        Ok(())
    }

    fn append_cached_transaction(
        &self,
        user_id: &str,
        txn: Transaction,
    ) -> Result<(), CoreError> {
        let mut cached = self.cache.cached_transactions(user_id)?;
        cached.push(txn);
        self.cache.set_cached_transactions(user_id, &cached)
    }

    fn append_cached_recurring(&self, user_id: &str, rule: RecurringRule) -> Result<(), CoreError> {
        let mut cached = self.cache.cached_recurrings(user_id)?;
        cached.push(rule);
        self.cache.set_cached_recurrings(user_id, &cached)
    }
}

// Queued entries have no remote id yet, so equivalence falls back to the
// creation instant plus the user-entered fields.
fn contains_transaction(entries: &[Transaction], candidate: &Transaction) -> bool {
    entries.iter().any(|entry| {
        entry.timestamp == candidate.timestamp
            && entry.description == candidate.description
            && entry.amount == candidate.amount
    })
}

fn contains_recurring(entries: &[RecurringRule], candidate: &RecurringRule) -> bool {
    entries.iter().any(|entry| {
        entry.start_date == candidate.start_date
            && entry.description == candidate.description
            && entry.amount == candidate.amount
    })
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(
            "amount must be greater than zero".into(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "description must not be empty".into(),
        ));
    }
    Ok(())
}
