//! Pure calculations over transaction and recurring-rule lists.
//!
//! Every function here is deterministic and total: malformed numeric input
//! has already been coerced to `0.0` at deserialization, and no call depends
//! on external state, so the dashboard, reports, and assistant views can all
//! share one implementation and test it without mocks.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use finza_domain::{months_between, Category, RecurringRule, Transaction, TransactionType};

/// Aggregated income/expense figures for a transaction set.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSummary {
    pub incomes: f64,
    pub expenses: f64,
    pub disposable: f64,
    pub by_category: BTreeMap<Category, f64>,
}

/// Monthly-equivalent totals over active recurring rules.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecurringLoad {
    pub income: f64,
    pub expense: f64,
}

/// Category spending shares plus a conservative next-month budget.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingForecast {
    pub summary: TransactionSummary,
    pub distribution: BTreeMap<Category, f64>,
    pub suggested_budget: BTreeMap<Category, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordabilityStatus {
    Safe,
    Caution,
    NotRecommended,
}

impl std::fmt::Display for AffordabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AffordabilityStatus::Safe => "Safe",
            AffordabilityStatus::Caution => "Caution",
            AffordabilityStatus::NotRecommended => "Not recommended",
        };
        f.write_str(label)
    }
}

/// Verdict on a single prospective purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Affordability {
    pub status: AffordabilityStatus,
    pub percent_of_income: f64,
    pub new_balance: f64,
    pub margin: f64,
}

/// Feasibility of a savings goal at the current monthly savings rate.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProjection {
    pub months_remaining: i64,
    pub required_monthly: f64,
    pub achievable: bool,
    pub projected_total: f64,
}

/// Prudent purchase ranges derived from disposable income.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseBands {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

pub struct MetricsService;

impl MetricsService {
    /// Totals income and expenses, bucketing expenses by category. Entries
    /// with an unknown type count toward neither side.
    pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
        let mut incomes = 0.0;
        let mut expenses = 0.0;
        let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
        for txn in transactions {
            match txn.kind {
                TransactionType::Income => incomes += txn.amount,
                TransactionType::Expense => {
                    expenses += txn.amount;
                    *by_category.entry(txn.category).or_insert(0.0) += txn.amount;
                }
                TransactionType::Unknown => {}
            }
        }
        TransactionSummary {
            incomes,
            expenses,
            disposable: incomes - expenses,
            by_category,
        }
    }

    /// Converts one rule's amount to its monthly-equivalent figure.
    pub fn normalize_recurring(rule: &RecurringRule) -> f64 {
        rule.amount * rule.frequency.monthly_factor()
    }

    /// Monthly-equivalent income and expense load over active rules only.
    pub fn monthly_recurring_load(rules: &[RecurringRule]) -> RecurringLoad {
        let mut load = RecurringLoad::default();
        for rule in rules.iter().filter(|rule| rule.active) {
            let monthly = Self::normalize_recurring(rule);
            match rule.kind {
                TransactionType::Income => load.income += monthly,
                TransactionType::Expense => load.expense += monthly,
                TransactionType::Unknown => {}
            }
        }
        load
    }

    /// Spending distribution and a suggested budget that trims the top two
    /// expense categories by 10%. The distribution denominator is floored at
    /// 1.0 so an all-income month divides cleanly.
    pub fn predict_spending(transactions: &[Transaction]) -> SpendingForecast {
        let summary = Self::summarize(transactions);
        let denominator = summary.expenses.max(1.0);
        let distribution = summary
            .by_category
            .iter()
            .map(|(category, total)| (*category, total / denominator))
            .collect();

        let trimmed: Vec<Category> = Self::top_categories(&summary.by_category, 2)
            .into_iter()
            .map(|(category, _)| category)
            .collect();
        let suggested_budget = summary
            .by_category
            .iter()
            .map(|(category, total)| {
                let factor = if trimmed.contains(category) { 0.9 } else { 1.0 };
                (*category, total * factor)
            })
            .collect();

        SpendingForecast {
            summary,
            distribution,
            suggested_budget,
        }
    }

    /// Ranks a prospective spend against income share and savings impact.
    /// With zero income the share is taken as zero.
    pub fn affordability_check(
        spend_amount: f64,
        incomes: f64,
        savings: f64,
        fixed_expenses: f64,
    ) -> Affordability {
        let percent_of_income = if incomes > 0.0 {
            spend_amount / incomes
        } else {
            0.0
        };
        let status = if percent_of_income <= 0.03 {
            AffordabilityStatus::Safe
        } else if percent_of_income <= 0.08 {
            AffordabilityStatus::Caution
        } else {
            AffordabilityStatus::NotRecommended
        };
        let new_balance = (savings - spend_amount).max(0.0);
        Affordability {
            status,
            percent_of_income,
            new_balance,
            margin: new_balance - fixed_expenses,
        }
    }

    /// Projects a savings goal over the calendar months left until the
    /// target date, floored at one month.
    pub fn savings_goal_projection(
        goal_amount: f64,
        target_date: NaiveDate,
        monthly_savings: f64,
        today: NaiveDate,
    ) -> GoalProjection {
        let months_remaining = months_between(today, target_date).max(1);
        let required_monthly = goal_amount / months_remaining as f64;
        GoalProjection {
            months_remaining,
            required_monthly,
            achievable: monthly_savings >= required_monthly,
            projected_total: monthly_savings * months_remaining as f64,
        }
    }

    /// Prudent purchase ranges: 5% / 15% / 30% of disposable, floored at 0.
    pub fn purchase_bands(disposable: f64) -> PurchaseBands {
        PurchaseBands {
            small: (disposable * 0.05).max(0.0),
            medium: (disposable * 0.15).max(0.0),
            large: (disposable * 0.30).max(0.0),
        }
    }

    /// The `count` largest expense categories, highest first. Ties break on
    /// category order so the result is stable.
    pub fn top_categories(
        by_category: &BTreeMap<Category, f64>,
        count: usize,
    ) -> Vec<(Category, f64)> {
        let mut ranked: Vec<(Category, f64)> = by_category
            .iter()
            .map(|(category, total)| (*category, *total))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(count);
        ranked
    }
}
