//! Dual-path assistant: remote text generation with a deterministic
//! heuristic fallback. Generation failure is never surfaced; the fallback
//! always produces guidance carrying the same computed figures.

use std::sync::Arc;

use finza_domain::Transaction;

use crate::{
    generate::{GenerationOptions, TextGenerator},
    metrics_service::MetricsService,
    prompts, CoreError,
};

/// The fixed set of guidance requests the assistant answers, plus free-form
/// chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantIntent {
    MonthlySummary,
    CutSpending,
    Purchase,
    WeeklyBudget,
    Chat(String),
}

/// One way of producing assistant text for an intent.
pub trait ResponseStrategy: Send + Sync {
    fn respond(
        &self,
        intent: &AssistantIntent,
        transactions: &[Transaction],
    ) -> Result<String, CoreError>;
}

/// Renders the intent's prompt template and delegates to the generation
/// boundary. Any failure (transport, timeout, empty body) is an error for
/// the fallback policy to absorb.
pub struct RemoteResponder {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
}

impl RemoteResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, options: GenerationOptions) -> Self {
        Self { generator, options }
    }
}

impl ResponseStrategy for RemoteResponder {
    fn respond(
        &self,
        intent: &AssistantIntent,
        transactions: &[Transaction],
    ) -> Result<String, CoreError> {
        let summary = MetricsService::summarize(transactions);
        let prompt = prompts::prompt_for(intent, &summary);
        let text = self.generator.generate(&prompt, &self.options)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Assistant("generator returned empty text".into()));
        }
        Ok(trimmed.to_string())
    }
}

/// Deterministic templates embedding the computed figures to two decimal
/// places. Never empty.
pub struct HeuristicResponder;

impl HeuristicResponder {
    pub fn text(&self, intent: &AssistantIntent, transactions: &[Transaction]) -> String {
        let summary = MetricsService::summarize(transactions);
        match intent {
            AssistantIntent::MonthlySummary => {
                let top = MetricsService::top_categories(&summary.by_category, 3);
                let top_line = if top.is_empty() {
                    "no data".to_string()
                } else {
                    top.iter()
                        .map(|(category, total)| format!("{category} (${total:.2})"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!(
                    "Monthly summary based on your data:\n\
                     - Income: ${:.2}\n\
                     - Expenses: ${:.2}\n\
                     - Disposable: ${:.2}\n\
                     - Top spending categories: {}\n\
                     Recommendations: set limits per category, review subscriptions, and compare unit prices.",
                    summary.incomes, summary.expenses, summary.disposable, top_line
                )
            }
            AssistantIntent::CutSpending => {
                let top = MetricsService::top_categories(&summary.by_category, 2);
                let cuts = [0.10, 0.05];
                let mut lines = Vec::new();
                let mut total_saving = 0.0;
                for (index, (category, total)) in top.iter().enumerate() {
                    let cut = cuts[index];
                    let saving = total * cut;
                    total_saving += saving;
                    lines.push(format!(
                        "- {category}: cut {}% to save ${saving:.2}",
                        (cut * 100.0) as u32
                    ));
                }
                if lines.is_empty() {
                    lines.push("- no data".to_string());
                }
                format!(
                    "Easy cuts to start with:\n{}\n\
                     Estimated monthly saving: ${total_saving:.2}. Cancel unused subscriptions and buy by unit price.",
                    lines.join("\n")
                )
            }
            AssistantIntent::Purchase => {
                let safe = (summary.disposable * 0.25).max(0.0);
                let avoid = (summary.disposable * 0.60).max(0.0);
                format!(
                    "What you can safely spend right now:\n\
                     - Monthly disposable: ${:.2}\n\
                     - Safe purchase amount: ${safe:.2}\n\
                     - Avoid purchases above ${avoid:.2}; plan and save first.",
                    summary.disposable
                )
            }
            AssistantIntent::WeeklyBudget => {
                let forecast = MetricsService::predict_spending(transactions);
                let mut lines: Vec<String> = forecast
                    .suggested_budget
                    .iter()
                    .map(|(category, total)| format!("- {category}: ${:.2}/week", total / 4.0))
                    .collect();
                if lines.is_empty() {
                    lines.push("- no data".to_string());
                }
                format!(
                    "Suggested weekly budget per category:\n{}\n\
                     Keep weekly limits and flag anything past 80% of its cap.",
                    lines.join("\n")
                )
            }
            AssistantIntent::Chat(_) => {
                let bands = MetricsService::purchase_bands(summary.disposable);
                format!(
                    "General guidance based on your numbers:\n\
                     - Monthly disposable: ${:.2}\n\
                     - Prudent purchase ranges: small ${:.2}, medium ${:.2}, large ${:.2}\n\
                     - Set limits per category, review subscriptions, and compare prices.\n\
                     - Avoid debt unless it is interest-free with a clear payoff plan.",
                    summary.disposable, bands.small, bands.medium, bands.large
                )
            }
        }
    }
}

impl ResponseStrategy for HeuristicResponder {
    fn respond(
        &self,
        intent: &AssistantIntent,
        transactions: &[Transaction],
    ) -> Result<String, CoreError> {
        Ok(self.text(intent, transactions))
    }
}

/// Front door for assistant replies. Built without a generator it is purely
/// heuristic; with one, remote text is preferred and the heuristic covers
/// every failure.
pub struct AssistantService {
    remote: Option<RemoteResponder>,
    heuristic: HeuristicResponder,
}

impl AssistantService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, options: GenerationOptions) -> Self {
        Self {
            remote: generator.map(|generator| RemoteResponder::new(generator, options)),
            heuristic: HeuristicResponder,
        }
    }

    pub fn respond(&self, intent: &AssistantIntent, transactions: &[Transaction]) -> String {
        respond_with_fallback(self.remote.as_ref(), &self.heuristic, intent, transactions)
    }
}

/// The single fallback policy: remote first when configured, heuristic on
/// any failure.
fn respond_with_fallback(
    remote: Option<&RemoteResponder>,
    heuristic: &HeuristicResponder,
    intent: &AssistantIntent,
    transactions: &[Transaction],
) -> String {
    if let Some(remote) = remote {
        match remote.respond(intent, transactions) {
            Ok(text) => return text,
            Err(err) => {
                tracing::info!(error = %err, "remote generation failed, using heuristic fallback");
            }
        }
    }
    heuristic.text(intent, transactions)
}
