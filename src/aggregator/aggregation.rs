//! Expense filtering and aggregation for charts.
//!
//! These are pure functions over a slice of expenses. The
//! [ExpenseAggregator](super::ExpenseAggregator) calls them in sequence each
//! time its inputs change.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use time::Date;

use crate::{
    expense::ExpenseRecord,
    filter::FilterState,
    time_range::{TimeRange, weekday_position},
};

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category value, e.g. "travel".
    pub category: String,
    /// The sum of the filtered expenses in the category, always positive.
    pub total: f64,
}

/// The total amount spent in one chart bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    /// The bucket label, see [TimeRange::bucket_key].
    pub bucket_key: String,
    /// The sum of the filtered expenses in the bucket.
    pub amount: f64,
}

/// Selects the expenses that match `filters`, keeping their order.
///
/// Expenses must fall strictly after the time range's cutoff date, which is
/// calculated relative to `today`. When the range is custom and both custom
/// dates are set, expenses after the start date up to and including the end
/// date are returned and the user and category selections are ignored.
/// A custom range missing either date applies no date filter at all.
pub fn filter_expenses(
    expenses: &[ExpenseRecord],
    filters: &FilterState,
    today: Date,
) -> Vec<ExpenseRecord> {
    if let Some((start, end)) = filters.custom_bounds() {
        return expenses
            .iter()
            .filter(|expense| expense.date > start && expense.date <= end)
            .cloned()
            .collect();
    }

    let cutoff = filters.time_range().cutoff(today);
    let selected_users = filters.selected_user_ids();
    let selected_categories = filters.selected_categories();

    expenses
        .iter()
        .filter(|expense| cutoff.is_none_or(|cutoff| expense.date > cutoff))
        .filter(|expense| selected_users.is_empty() || selected_users.contains(&expense.user_id))
        .filter(|expense| {
            selected_categories.is_empty() || selected_categories.contains(&expense.category)
        })
        .cloned()
        .collect()
}

/// The categories used by `expenses` in order of first appearance.
pub fn distinct_categories(expenses: &[ExpenseRecord]) -> Vec<String> {
    let mut seen = HashSet::new();

    expenses
        .iter()
        .filter(|expense| seen.insert(expense.category.as_str()))
        .map(|expense| expense.category.clone())
        .collect()
}

/// Sums the filtered expenses for each of `categories`.
///
/// Categories with nothing to show (a total of zero) are left out.
pub fn category_totals(
    filtered_expenses: &[ExpenseRecord],
    categories: &[String],
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for expense in filtered_expenses {
        *totals.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
    }

    categories
        .iter()
        .filter_map(|category| {
            let total = totals.get(category.as_str()).copied().unwrap_or(0.0);

            (total > 0.0).then(|| CategoryTotal {
                category: category.clone(),
                total,
            })
        })
        .collect()
}

/// Sums the filtered expenses into the chart buckets for `time_range`.
///
/// Weekly buckets are ordered Sunday to Saturday. All other buckets are
/// ordered by comparing their keys as strings, which is chronological for
/// days of the month but not for month names.
pub fn time_series(
    filtered_expenses: &[ExpenseRecord],
    time_range: TimeRange,
) -> Vec<TimeSeriesPoint> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for expense in filtered_expenses {
        *totals
            .entry(time_range.bucket_key(expense.date))
            .or_insert(0.0) += expense.amount;
    }

    let mut points: Vec<_> = totals
        .into_iter()
        .map(|(bucket_key, amount)| TimeSeriesPoint { bucket_key, amount })
        .collect();

    match time_range {
        TimeRange::Week => points.sort_by_key(|point| weekday_position(&point.bucket_key)),
        _ => points.sort_by(|a, b| a.bucket_key.cmp(&b.bucket_key)),
    }

    points
}
