//! The expense records consumed by the dashboard and the category catalogue
//! used to label them.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::user::UserID;

/// The ID of an expense record.
pub type ExpenseId = i64;

/// A submitted expense.
///
/// Records are read-only once loaded, the dashboard never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The ID of the user that submitted the expense.
    pub user_id: UserID,
    /// The category value, e.g. "travel". See [CATEGORIES] for display labels.
    pub category: String,
    /// The expense amount, never negative.
    pub amount: f64,
    /// The calendar date the expense occurred on.
    pub date: Date,
    /// Who was paid.
    #[serde(default)]
    pub merchant: String,
    /// Free text provided by the submitter.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether a company policy flagged the expense.
    #[serde(default)]
    pub flagged: bool,
    /// Why the expense was flagged, if it was.
    #[serde(default)]
    pub flag_reason: Option<String>,
}

impl ExpenseRecord {
    /// Create an unflagged expense with no merchant or description.
    pub fn new(
        id: ExpenseId,
        user_id: UserID,
        category: impl Into<String>,
        amount: f64,
        date: Date,
    ) -> Self {
        Self {
            id,
            user_id,
            category: category.into(),
            amount,
            date,
            merchant: String::new(),
            description: None,
            flagged: false,
            flag_reason: None,
        }
    }

    /// Mark the expense as flagged by a policy.
    pub fn flagged(mut self, reason: impl Into<String>) -> Self {
        self.flagged = true;
        self.flag_reason = Some(reason.into());
        self
    }

    /// Set the merchant.
    pub fn merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }
}

/// The expense categories the application knows about as (value, label) pairs.
pub const CATEGORIES: [(&str, &str); 7] = [
    ("general", "General"),
    ("travel", "Travel"),
    ("food", "Food"),
    ("lodging", "Lodging"),
    ("transportation", "Transportation"),
    ("supplies", "Supplies"),
    ("other", "Other"),
];

/// Get the display label for a category value.
///
/// Values missing from [CATEGORIES] are displayed as-is.
pub fn category_label(value: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(category, _)| *category == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}
