//! Prompt templates for the remote responder, kept out of the engine so the
//! assistant logic stays independent of wording changes.

use crate::{
    assistant::AssistantIntent,
    metrics_service::TransactionSummary,
};

/// Renders the generation prompt for an intent, embedding the computed
/// summary figures.
pub fn prompt_for(intent: &AssistantIntent, summary: &TransactionSummary) -> String {
    let categories = category_lines(summary);
    match intent {
        AssistantIntent::MonthlySummary => format!(
            "Act as a financial advisor and deliver a concise monthly summary. \
             Income ${:.2}, expenses ${:.2}, disposable ${:.2}. By category: {categories}. \
             Include 3 observations and 3 clear recommendations, with figures where relevant.",
            summary.incomes, summary.expenses, summary.disposable
        ),
        AssistantIntent::CutSpending => format!(
            "Explain in very simple terms where to cut back without much impact. \
             Top categories: {categories}. \
             Give percentages and the estimated saving as a short list."
        ),
        AssistantIntent::Purchase => format!(
            "Answer simply how much is safe to spend on a purchase. \
             Income ${:.2}, expenses ${:.2}, disposable ${:.2}. \
             Include a safe amount and a threshold to avoid.",
            summary.incomes, summary.expenses, summary.disposable
        ),
        AssistantIntent::WeeklyBudget => format!(
            "Suggest a weekly budget per category based on current spending and a \
             conservative adjustment. By category: {categories}. \
             Include numeric weekly limits and control tips."
        ),
        AssistantIntent::Chat(message) => format!(
            "You are a responsible financial advisor. Answer with concrete steps. \
             Context: income ${:.2}, expenses ${:.2}, disposable ${:.2}. \
             By category: {categories}. \
             User question: '{message}'. \
             Include estimated figures where relevant, suggest limits and cheaper \
             alternatives, and do not encourage risky debt.",
            summary.incomes, summary.expenses, summary.disposable
        ),
    }
}

fn category_lines(summary: &TransactionSummary) -> String {
    if summary.by_category.is_empty() {
        return "no data".to_string();
    }
    summary
        .by_category
        .iter()
        .map(|(category, total)| format!("{category}: ${total:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}
