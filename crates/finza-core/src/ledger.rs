//! Boundary to the hosted document store holding transactions and
//! recurring rules.

use thiserror::Error;

use finza_domain::{RecurringRule, Transaction};

use crate::CoreError;

/// Failure reported by the remote ledger. Network trouble and remote-side
/// validation are distinguishable only by message text; the consumed API
/// does not separate them.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Remote(String),
}

impl From<LedgerError> for CoreError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => CoreError::NotFound(id),
            LedgerError::Remote(message) => CoreError::Ledger(message),
        }
    }
}

/// Abstraction over the remote document store. Errors are returned, never
/// panicked; create calls return the id the store assigned.
pub trait LedgerClient: Send + Sync {
    fn create_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<String, LedgerError>;
    fn create_recurring(&self, user_id: &str, rule: &RecurringRule)
        -> Result<String, LedgerError>;
    fn read_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, LedgerError>;
    fn read_recurrings(&self, user_id: &str) -> Result<Vec<RecurringRule>, LedgerError>;
    fn update_transaction(&self, id: &str, transaction: &Transaction) -> Result<(), LedgerError>;
    fn delete_transaction(&self, id: &str) -> Result<(), LedgerError>;
    fn update_recurring(&self, id: &str, rule: &RecurringRule) -> Result<(), LedgerError>;
    fn delete_recurring(&self, id: &str) -> Result<(), LedgerError>;
}
