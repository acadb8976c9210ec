use std::collections::BTreeSet;

use time::Date;

use crate::{
    aggregator::aggregation::{
        CategoryTotal, TimeSeriesPoint, category_totals, distinct_categories, filter_expenses,
        time_series,
    },
    expense::ExpenseRecord,
    filter::FilterState,
    summary::{ExpenseSummary, summarize},
    time_range::TimeRange,
    user::UserID,
};

/// Holds a list of expenses with the user's filters and the views derived
/// from them.
///
/// Every setter recomputes the derived views, so the accessors are always
/// consistent with the current filters. Nothing is cached between
/// recomputations.
///
/// The aggregator never reads the clock. `today` is supplied by the caller
/// and is the reference date for the time range cutoffs.
#[derive(Debug, Clone)]
pub struct ExpenseAggregator {
    expenses: Vec<ExpenseRecord>,
    today: Date,
    filters: FilterState,
    categories: Vec<String>,
    filtered_expenses: Vec<ExpenseRecord>,
    category_totals: Vec<CategoryTotal>,
    time_series: Vec<TimeSeriesPoint>,
}

impl ExpenseAggregator {
    /// Create an aggregator for `expenses` with the default filters.
    pub fn new(expenses: Vec<ExpenseRecord>, today: Date) -> Self {
        Self::with_filters(expenses, FilterState::default(), today)
    }

    /// Create an aggregator for `expenses` starting from `filters`.
    pub fn with_filters(expenses: Vec<ExpenseRecord>, filters: FilterState, today: Date) -> Self {
        let mut aggregator = Self {
            expenses,
            today,
            filters,
            categories: Vec::new(),
            filtered_expenses: Vec::new(),
            category_totals: Vec::new(),
            time_series: Vec::new(),
        };

        aggregator.recompute();
        aggregator
    }

    /// Replace the expense list, keeping the current filters.
    ///
    /// `None` is treated as an empty list.
    pub fn set_expenses(&mut self, expenses: Option<Vec<ExpenseRecord>>) {
        self.expenses = expenses.unwrap_or_default();
        self.recompute();
    }

    /// Change the reference date used for the time range cutoffs.
    pub fn set_today(&mut self, today: Date) {
        self.today = today;
        self.recompute();
    }

    /// See [FilterState::set_time_range].
    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.filters.set_time_range(time_range);
        self.recompute();
    }

    /// See [FilterState::set_custom_start].
    pub fn set_custom_start(&mut self, date: Option<Date>) {
        self.filters.set_custom_start(date);
        self.recompute();
    }

    /// See [FilterState::set_custom_end].
    pub fn set_custom_end(&mut self, date: Option<Date>) {
        self.filters.set_custom_end(date);
        self.recompute();
    }

    /// See [FilterState::toggle_user_selection].
    pub fn toggle_user_selection(&mut self, user_id: UserID) {
        self.filters.toggle_user_selection(user_id);
        self.recompute();
    }

    /// See [FilterState::toggle_category_selection].
    pub fn toggle_category_selection(&mut self, category: &str) {
        self.filters.toggle_category_selection(category);
        self.recompute();
    }

    /// See [FilterState::clear_filters].
    pub fn clear_filters(&mut self) {
        self.filters.clear_filters();
        self.recompute();
    }

    /// Derive the filtered expenses, category totals and time series from
    /// the current expenses and filters.
    pub fn recompute(&mut self) {
        self.categories = distinct_categories(&self.expenses);
        self.filtered_expenses = filter_expenses(&self.expenses, &self.filters, self.today);
        self.category_totals = category_totals(&self.filtered_expenses, &self.categories);
        self.time_series = time_series(&self.filtered_expenses, self.filters.time_range());

        tracing::debug!(
            "Aggregated {} of {} expenses into {} categories and {} buckets for {:?}",
            self.filtered_expenses.len(),
            self.expenses.len(),
            self.category_totals.len(),
            self.time_series.len(),
            self.filters.time_range(),
        );
    }

    /// All expenses, unfiltered.
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// The reference date for the time range cutoffs.
    pub fn today(&self) -> Date {
        self.today
    }

    /// The current filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The expenses that match the current filters.
    pub fn filtered_expenses(&self) -> &[ExpenseRecord] {
        &self.filtered_expenses
    }

    /// The per-category totals of the filtered expenses.
    pub fn category_totals(&self) -> &[CategoryTotal] {
        &self.category_totals
    }

    /// The time-bucketed totals of the filtered expenses.
    pub fn time_series(&self) -> &[TimeSeriesPoint] {
        &self.time_series
    }

    /// Every category used by the unfiltered expenses.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The selected time range.
    pub fn time_range(&self) -> TimeRange {
        self.filters.time_range()
    }

    /// The start of the custom range, if set.
    pub fn custom_start(&self) -> Option<Date> {
        self.filters.custom_start()
    }

    /// The end of the custom range, if set.
    pub fn custom_end(&self) -> Option<Date> {
        self.filters.custom_end()
    }

    /// The selected users.
    pub fn selected_user_ids(&self) -> &BTreeSet<UserID> {
        self.filters.selected_user_ids()
    }

    /// The selected categories.
    pub fn selected_categories(&self) -> &BTreeSet<String> {
        self.filters.selected_categories()
    }

    /// Totals over the filtered expenses.
    pub fn summary(&self) -> ExpenseSummary {
        summarize(&self.filtered_expenses)
    }
}
