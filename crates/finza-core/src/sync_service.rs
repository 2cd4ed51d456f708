//! Opportunistic drain of the pending-write queue against the remote ledger.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use once_cell::sync::Lazy;
use uuid::Uuid;

use finza_domain::PendingPayload;

use crate::{ledger::LedgerClient, storage::CacheStore, CoreError};

/// Outcome of one drain pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub synced: usize,
    pub errors: Vec<String>,
}

// One guard per user, shared process-wide: a drain triggered from app start
// and another from a view mount must not both submit the same queue.
static DRAIN_GUARDS: Lazy<Mutex<HashMap<String, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn drain_guard(user_id: &str) -> Arc<Mutex<()>> {
    let mut guards = DRAIN_GUARDS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guards.entry(user_id.to_string()).or_default().clone()
}

/// Flushes queued writes to the ledger with at-least-once delivery. Failed
/// entries stay queued for the next opportunity; a write is never dropped.
pub struct SyncEngine {
    cache: Arc<dyn CacheStore>,
    ledger: Arc<dyn LedgerClient>,
}

impl SyncEngine {
    pub fn new(cache: Arc<dyn CacheStore>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self { cache, ledger }
    }

    /// Drains the user's pending queue in enqueue order. The persisted queue
    /// is rewritten once, after the loop, never incrementally, so a crash
    /// mid-drain keeps every unsynced entry intact.
    pub fn sync_pending(&self, user_id: &str) -> Result<SyncReport, CoreError> {
        let guard = drain_guard(user_id);
        let _drain = guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let queue = self.cache.pending(user_id)?;
        if queue.is_empty() {
            return Ok(SyncReport::default());
        }

        let mut drained: Vec<Uuid> = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        for write in &queue {
            let result = match &write.payload {
                PendingPayload::Transaction(txn) => self
                    .ledger
                    .create_transaction(user_id, txn)
                    .map(|_assigned_id| ()),
                PendingPayload::Recurring(rule) => self
                    .ledger
                    .create_recurring(user_id, rule)
                    .map(|_assigned_id| ()),
            };
            match result {
                Ok(()) => drained.push(write.local_id),
                Err(err) => errors.push(err.to_string()),
            }
        }

        if !drained.is_empty() {
            // Removing by id (instead of overwriting with the retained
            // snapshot) keeps entries enqueued mid-drain.
            self.cache.remove_pending(user_id, &drained)?;
        }

        if errors.is_empty() {
            tracing::info!(user = %user_id, synced = drained.len(), "pending queue drained");
        } else {
            tracing::warn!(
                user = %user_id,
                synced = drained.len(),
                retained = queue.len() - drained.len(),
                "drain left entries queued for retry"
            );
        }

        Ok(SyncReport {
            synced: drained.len(),
            errors,
        })
    }
}
