//! Wires the engine crates together behind one app-facing surface.

use std::sync::Arc;

use chrono::NaiveDate;

use finza_config::Config;
use finza_core::{
    assistant::{AssistantIntent, AssistantService},
    entry_service::{EntryService, RecurringDraft, TransactionDraft, WriteOutcome},
    generate::{GenerationOptions, TextGenerator},
    ledger::LedgerClient,
    metrics_service::{GoalProjection, MetricsService, TransactionSummary},
    storage::CacheStore,
    sync_service::{SyncEngine, SyncReport},
    time::{Clock, SystemClock},
    CoreError,
};
use finza_domain::{RecurringRule, Transaction};
use finza_storage_json::JsonCacheStore;

/// Application core: owns the engines and the boundary clients they share.
pub struct FinzaApp {
    entries: EntryService,
    sync: SyncEngine,
    assistant: AssistantService,
    clock: Arc<dyn Clock>,
}

impl FinzaApp {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        ledger: Arc<dyn LedgerClient>,
        generator: Option<Arc<dyn TextGenerator>>,
        clock: Arc<dyn Clock>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            entries: EntryService::new(cache.clone(), ledger.clone(), clock.clone()),
            sync: SyncEngine::new(cache, ledger),
            assistant: AssistantService::new(generator, options),
            clock,
        }
    }

    /// Builds an app over the JSON cache store at the configured root, with
    /// the wall clock and the config's generation settings.
    pub fn with_config(
        config: &Config,
        ledger: Arc<dyn LedgerClient>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self, CoreError> {
        let cache = Arc::new(JsonCacheStore::new(config.resolve_cache_root())?);
        let options = GenerationOptions {
            temperature: config.assistant.temperature,
            max_tokens: config.assistant.max_tokens,
        };
        Ok(Self::new(
            cache,
            ledger,
            generator,
            Arc::new(SystemClock),
            options,
        ))
    }

    pub fn record_transaction(
        &self,
        user_id: &str,
        draft: TransactionDraft,
    ) -> Result<WriteOutcome, CoreError> {
        self.entries.record_transaction(user_id, draft)
    }

    pub fn record_recurring(
        &self,
        user_id: &str,
        draft: RecurringDraft,
    ) -> Result<WriteOutcome, CoreError> {
        self.entries.record_recurring(user_id, draft)
    }

    pub fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        self.entries.load_transactions(user_id)
    }

    pub fn recurrings(&self, user_id: &str) -> Result<Vec<RecurringRule>, CoreError> {
        self.entries.load_recurrings(user_id)
    }

    pub fn update_transaction(
        &self,
        user_id: &str,
        id: &str,
        draft: TransactionDraft,
    ) -> Result<(), CoreError> {
        self.entries.update_transaction(user_id, id, draft)
    }

    pub fn delete_transaction(&self, user_id: &str, id: &str) -> Result<(), CoreError> {
        self.entries.delete_transaction(user_id, id)
    }

    pub fn update_recurring(
        &self,
        user_id: &str,
        id: &str,
        draft: RecurringDraft,
    ) -> Result<(), CoreError> {
        self.entries.update_recurring(user_id, id, draft)
    }

    pub fn delete_recurring(&self, user_id: &str, id: &str) -> Result<(), CoreError> {
        self.entries.delete_recurring(user_id, id)
    }

    /// Opportunistic queue drain, called on app start and view mounts.
    pub fn sync_pending(&self, user_id: &str) -> Result<SyncReport, CoreError> {
        self.sync.sync_pending(user_id)
    }

    /// Fresh (or cached, when offline) figures for the dashboard header.
    pub fn dashboard_summary(&self, user_id: &str) -> Result<TransactionSummary, CoreError> {
        Ok(MetricsService::summarize(&self.transactions(user_id)?))
    }

    /// Goal feasibility measured from today.
    pub fn savings_goal(
        &self,
        goal_amount: f64,
        target_date: NaiveDate,
        monthly_savings: f64,
    ) -> GoalProjection {
        MetricsService::savings_goal_projection(
            goal_amount,
            target_date,
            monthly_savings,
            self.clock.today(),
        )
    }

    pub fn assistant_reply(
        &self,
        user_id: &str,
        intent: &AssistantIntent,
    ) -> Result<String, CoreError> {
        let transactions = self.transactions(user_id)?;
        Ok(self.assistant.respond(intent, &transactions))
    }
}
