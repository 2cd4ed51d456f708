//! Boundary to durable per-user local storage.

use uuid::Uuid;

use finza_domain::{PendingWrite, RecurringRule, Transaction};

use crate::CoreError;

/// Abstraction over the per-user offline cache: last-known entry lists plus
/// the pending-write queue. A local fallback only, never the source of truth
/// while the remote ledger is reachable.
///
/// Missing keys read as empty lists. `enqueue_pending` must be safe to call
/// while a drain is in progress; drains therefore retire entries through
/// `remove_pending` by id rather than overwriting the whole queue blob.
pub trait CacheStore: Send + Sync {
    fn cached_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError>;
    fn set_cached_transactions(
        &self,
        user_id: &str,
        entries: &[Transaction],
    ) -> Result<(), CoreError>;
    fn cached_recurrings(&self, user_id: &str) -> Result<Vec<RecurringRule>, CoreError>;
    fn set_cached_recurrings(
        &self,
        user_id: &str,
        entries: &[RecurringRule],
    ) -> Result<(), CoreError>;
    fn enqueue_pending(&self, user_id: &str, write: PendingWrite) -> Result<(), CoreError>;
    fn pending(&self, user_id: &str) -> Result<Vec<PendingWrite>, CoreError>;
    /// Removes the listed queue entries, preserving the relative order of
    /// everything else.
    fn remove_pending(&self, user_id: &str, drained: &[Uuid]) -> Result<(), CoreError>;
    fn clear_pending(&self, user_id: &str) -> Result<(), CoreError>;
}
