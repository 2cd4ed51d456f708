//! Domain model for recurring income/expense rules.

use std::fmt;

use chrono::NaiveDate;
use serde::{de::Deserializer, Deserialize, Serialize};

use crate::common::*;

/// Average weeks per calendar month, used to normalize weekly cadences.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Cadence of a recurring rule. Unknown labels deserialize to `Monthly`,
/// which is also the neutral ×1 normalization.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum Frequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Bimonthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::Biweekly,
            "monthly" => Frequency::Monthly,
            "bimonthly" => Frequency::Bimonthly,
            "quarterly" => Frequency::Quarterly,
            "annual" => Frequency::Annual,
            _ => Frequency::Monthly,
        }
    }

    /// Multiplier that converts one occurrence's amount into a
    /// monthly-equivalent figure.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Frequency::Weekly => WEEKS_PER_MONTH,
            Frequency::Biweekly => 2.0,
            Frequency::Monthly => 1.0,
            Frequency::Bimonthly => 0.5,
            Frequency::Quarterly => 1.0 / 3.0,
            Frequency::Annual => 1.0 / 12.0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Annual => "Annual",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|v| Frequency::from_label(&v)).unwrap_or_default())
    }
}

/// A repeating income or expense tracked alongside ad-hoc transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default = "RecurringRule::default_active")]
    pub active: bool,
}

impl RecurringRule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        kind: TransactionType,
        category: Category,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            amount,
            description: description.into(),
            kind,
            category,
            frequency,
            start_date,
            active: true,
        }
    }

    fn default_active() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_frequency_reads_as_monthly() {
        let raw = r#"{
            "amount": 90,
            "description": "Gym",
            "type": "Expense",
            "category": "Health",
            "frequency": "Fortnightly",
            "start_date": "2025-01-01"
        }"#;
        let rule: RecurringRule = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(rule.frequency, Frequency::Monthly);
        assert!(rule.active);
    }

    #[test]
    fn monthly_factors_match_the_table() {
        assert_eq!(Frequency::Weekly.monthly_factor(), WEEKS_PER_MONTH);
        assert_eq!(Frequency::Biweekly.monthly_factor(), 2.0);
        assert_eq!(Frequency::Monthly.monthly_factor(), 1.0);
        assert_eq!(Frequency::Bimonthly.monthly_factor(), 0.5);
        assert!((Frequency::Quarterly.monthly_factor() - 1.0 / 3.0).abs() < 1e-12);
        assert!((Frequency::Annual.monthly_factor() - 1.0 / 12.0).abs() < 1e-12);
    }
}
