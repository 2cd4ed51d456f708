//! Shared enums, lenient field parsing, and date arithmetic.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{de::Deserializer, Deserialize, Serialize};

/// Direction of a ledger entry. `Unknown` absorbs unrecognized labels so a
/// malformed remote document never fails a whole fetch; it contributes to
/// neither income nor expense totals.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum TransactionType {
    Income,
    Expense,
    #[default]
    Unknown,
}

impl TransactionType {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => TransactionType::Unknown,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| TransactionType::from_label(&v))
            .unwrap_or_default())
    }
}

/// Closed category set. Unknown labels deserialize to `Other` so documents
/// written by older clients stay loadable.
#[derive(
    Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Category {
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Health,
    Education,
    Shopping,
    Taxes,
    Debts,
    #[default]
    Other,
}

impl Category {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "housing" => Category::Housing,
            "utilities" => Category::Utilities,
            "entertainment" => Category::Entertainment,
            "health" => Category::Health,
            "education" => Category::Education,
            "shopping" => Category::Shopping,
            "taxes" => Category::Taxes,
            "debts" => Category::Debts,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Shopping => "Shopping",
            Category::Taxes => "Taxes",
            Category::Debts => "Debts",
            Category::Other => "Other",
        }
    }

    /// Non-discretionary categories counted as fixed expenses.
    pub fn is_fixed(&self) -> bool {
        matches!(
            self,
            Category::Housing | Category::Utilities | Category::Taxes | Category::Debts
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|v| Category::from_label(&v)).unwrap_or_default())
    }
}

/// Target collection of a queued write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    Transaction,
    Recurring,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Transaction => "Transaction",
            EntryKind::Recurring => "Recurring",
        };
        f.write_str(label)
    }
}

/// Accepts numeric or string amounts; anything unparsable becomes `0.0`.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let parsed = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) if value.is_finite() => value,
        RawAmount::Number(_) => 0.0,
        RawAmount::Text(value) => value.trim().parse::<f64>().unwrap_or(0.0),
        RawAmount::Other(_) => 0.0,
    };
    Ok(parsed)
}

/// Calendar month-index difference between two dates. Negative when `to`
/// precedes `from`; callers clamp as needed.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let from_idx = from.year() as i64 * 12 + from.month0() as i64;
    let to_idx = to.year() as i64 * 12 + to.month0() as i64;
    to_idx - from_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_fall_back() {
        assert_eq!(TransactionType::from_label("Credit"), TransactionType::Unknown);
        assert_eq!(Category::from_label("Groceries"), Category::Other);
        assert_eq!(Category::from_label(" housing "), Category::Housing);
    }

    #[test]
    fn fixed_categories_cover_non_discretionary_set() {
        assert!(Category::Housing.is_fixed());
        assert!(Category::Debts.is_fixed());
        assert!(!Category::Entertainment.is_fixed());
    }

    #[test]
    fn months_between_uses_calendar_months() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let jul = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        assert_eq!(months_between(jan, jul), 6);
        assert_eq!(months_between(jul, jan), -6);
        assert_eq!(months_between(jan, jan), 0);
    }
}
