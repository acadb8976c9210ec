//! The JSON view of the aggregated expenses.

use std::collections::BTreeSet;

use serde::Serialize;
use time::Date;

use crate::{
    aggregator::{CategoryTotal, ExpenseAggregator, TimeSeriesPoint},
    expense::ExpenseRecord,
    policy::PolicyRecord,
    summary::ExpenseSummary,
    time_range::TimeRange,
    user::UserID,
};

/// The filters and every view the aggregator derives from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// The selected time range.
    pub time_range: TimeRange,
    /// The start of the custom range.
    pub custom_start: Option<Date>,
    /// The end of the custom range.
    pub custom_end: Option<Date>,
    /// The selected user IDs, empty when every user is shown.
    pub selected_users: BTreeSet<UserID>,
    /// The selected categories, empty when every category is shown.
    pub selected_categories: BTreeSet<String>,
    /// Every category in the unfiltered expenses.
    pub categories: Vec<String>,
    /// The expenses that passed the filters.
    pub filtered_expenses: Vec<ExpenseRecord>,
    /// The non-zero total of each category.
    pub category_totals: Vec<CategoryTotal>,
    /// The filtered totals bucketed for charting.
    pub time_series: Vec<TimeSeriesPoint>,
    /// Totals and counts for the filtered expenses.
    pub summary: ExpenseSummary,
    /// The company's expense policies, unfiltered.
    pub policies: Vec<PolicyRecord>,
}

impl AnalyticsReport {
    /// Snapshot the filters and derived views of `aggregator`.
    pub fn new(aggregator: &ExpenseAggregator, policies: Vec<PolicyRecord>) -> Self {
        Self {
            time_range: aggregator.time_range(),
            custom_start: aggregator.custom_start(),
            custom_end: aggregator.custom_end(),
            selected_users: aggregator.selected_user_ids().clone(),
            selected_categories: aggregator.selected_categories().clone(),
            categories: aggregator.categories().to_vec(),
            filtered_expenses: aggregator.filtered_expenses().to_vec(),
            category_totals: aggregator.category_totals().to_vec(),
            time_series: aggregator.time_series().to_vec(),
            summary: aggregator.summary(),
            policies,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        aggregator::ExpenseAggregator, expense::ExpenseRecord, filter::FilterState,
        time_range::TimeRange, user::UserID,
    };

    use super::AnalyticsReport;

    #[test]
    fn report_mirrors_aggregator() {
        let expenses = vec![
            ExpenseRecord::new(1, UserID::new(1), "travel", 40.0, date!(2024 - 03 - 02)),
            ExpenseRecord::new(2, UserID::new(2), "food", 10.0, date!(2024 - 03 - 09)),
            ExpenseRecord::new(3, UserID::new(1), "travel", 5.0, date!(2024 - 03 - 09)),
        ];
        let mut filters = FilterState::new();
        filters.set_time_range(TimeRange::Custom);
        filters.set_custom_start(Some(date!(2024 - 03 - 01)));
        filters.set_custom_end(Some(date!(2024 - 03 - 31)));
        filters.toggle_user_selection(UserID::new(1));
        let aggregator = ExpenseAggregator::with_filters(expenses, filters, date!(2024 - 04 - 01));

        let report = AnalyticsReport::new(&aggregator, Vec::new());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["time_range"], "custom");
        assert_eq!(json["selected_users"], serde_json::json!([1]));
        // Custom ranges ignore user selections.
        assert_eq!(report.filtered_expenses.len(), 3);
        assert_eq!(
            json["time_series"],
            serde_json::json!([{"bucket_key": "Mar 24", "amount": 55.0}])
        );
        assert_eq!(json["summary"]["expense_count"], 3);
        assert_eq!(json["policies"], serde_json::json!([]));
    }
}
