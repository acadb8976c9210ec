//! Expense aggregation for the dashboard.
//!
//! Turns a list of expenses and a [FilterState](crate::FilterState) into:
//! - the filtered expenses
//! - per-category totals for the category pie chart
//! - time-bucketed totals for the expense trend chart

mod aggregation;
mod core;

pub use aggregation::{
    CategoryTotal, TimeSeriesPoint, category_totals, distinct_categories, filter_expenses,
    time_series,
};
pub use core::ExpenseAggregator;
