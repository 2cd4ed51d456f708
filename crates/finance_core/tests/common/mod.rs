//! Shared test doubles for the boundary traits.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use finza_core::{
    auth::{auth_error_message, AuthClient, AuthSession},
    generate::{GenerationOptions, TextGenerator},
    ledger::{LedgerClient, LedgerError},
    time::Clock,
    CoreError,
};
use finza_domain::{Category, RecurringRule, Transaction, TransactionType};

/// In-memory ledger that can be taken offline at will.
#[derive(Default)]
pub struct MemoryLedger {
    offline: AtomicBool,
    pub transactions: Mutex<Vec<Transaction>>,
    pub recurrings: Mutex<Vec<RecurringRule>>,
}

impl MemoryLedger {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Remote("network unreachable".into()));
        }
        Ok(())
    }
}

impl LedgerClient for MemoryLedger {
    fn create_transaction(
        &self,
        _user_id: &str,
        transaction: &Transaction,
    ) -> Result<String, LedgerError> {
        self.check_online()?;
        let mut remote = self.transactions.lock().expect("lock");
        let id = format!("t{}", remote.len() + 1);
        let mut stored = transaction.clone();
        stored.id = Some(id.clone());
        remote.push(stored);
        Ok(id)
    }

    fn create_recurring(
        &self,
        _user_id: &str,
        rule: &RecurringRule,
    ) -> Result<String, LedgerError> {
        self.check_online()?;
        let mut remote = self.recurrings.lock().expect("lock");
        let id = format!("r{}", remote.len() + 1);
        let mut stored = rule.clone();
        stored.id = Some(id.clone());
        remote.push(stored);
        Ok(id)
    }

    fn read_transactions(&self, _user_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        self.check_online()?;
        Ok(self.transactions.lock().expect("lock").clone())
    }

    fn read_recurrings(&self, _user_id: &str) -> Result<Vec<RecurringRule>, LedgerError> {
        self.check_online()?;
        Ok(self.recurrings.lock().expect("lock").clone())
    }

    fn update_transaction(&self, id: &str, transaction: &Transaction) -> Result<(), LedgerError> {
        self.check_online()?;
        let mut remote = self.transactions.lock().expect("lock");
        match remote
            .iter_mut()
            .find(|entry| entry.id.as_deref() == Some(id))
        {
            Some(slot) => {
                *slot = transaction.clone();
                Ok(())
            }
            None => Err(LedgerError::NotFound(id.into())),
        }
    }

    fn delete_transaction(&self, id: &str) -> Result<(), LedgerError> {
        self.check_online()?;
        let mut remote = self.transactions.lock().expect("lock");
        let before = remote.len();
        remote.retain(|entry| entry.id.as_deref() != Some(id));
        if remote.len() == before {
            return Err(LedgerError::NotFound(id.into()));
        }
        Ok(())
    }

    fn update_recurring(&self, id: &str, rule: &RecurringRule) -> Result<(), LedgerError> {
        self.check_online()?;
        let mut remote = self.recurrings.lock().expect("lock");
        match remote
            .iter_mut()
            .find(|entry| entry.id.as_deref() == Some(id))
        {
            Some(slot) => {
                *slot = rule.clone();
                Ok(())
            }
            None => Err(LedgerError::NotFound(id.into())),
        }
    }

    fn delete_recurring(&self, id: &str) -> Result<(), LedgerError> {
        self.check_online()?;
        let mut remote = self.recurrings.lock().expect("lock");
        let before = remote.len();
        remote.retain(|entry| entry.id.as_deref() != Some(id));
        if remote.len() == before {
            return Err(LedgerError::NotFound(id.into()));
        }
        Ok(())
    }
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("timestamp")
    }
}

/// Provider double accepting one known account.
pub struct StubAuth {
    pub known_email: &'static str,
    pub known_password: &'static str,
}

impl AuthClient for StubAuth {
    fn sign_up(&self, email: &str, _password: &str) -> Result<AuthSession, CoreError> {
        if email == self.known_email {
            return Err(CoreError::Auth(auth_error_message("EMAIL_EXISTS")));
        }
        Ok(AuthSession {
            user_id: "u-new".into(),
            email: email.into(),
            id_token: "token-new".into(),
        })
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, CoreError> {
        if email != self.known_email {
            return Err(CoreError::Auth(auth_error_message("EMAIL_NOT_FOUND")));
        }
        if password != self.known_password {
            return Err(CoreError::Auth(auth_error_message("INVALID_PASSWORD")));
        }
        Ok(AuthSession {
            user_id: "u-known".into(),
            email: email.into(),
            id_token: "token-known".into(),
        })
    }
}

/// Generator double that always fails, as an unconfigured client would.
pub struct DownGenerator;

impl TextGenerator for DownGenerator {
    fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String, CoreError> {
        Err(CoreError::Assistant("request timed out".into()))
    }
}

pub fn draft(amount: f64, description: &str) -> finza_core::entry_service::TransactionDraft {
    finza_core::entry_service::TransactionDraft {
        amount,
        description: description.to_string(),
        kind: TransactionType::Expense,
        category: Category::Food,
        date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
    }
}
