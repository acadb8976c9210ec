//! Dashboard module
//!
//! Provides the expense dashboard page with summary cards, charts, a filter
//! panel, the most recent expenses and the company policies, plus a JSON
//! endpoint exposing the same aggregates.

mod analytics;
mod cards;
mod charts;
mod filter_panel;
mod handlers;
mod policies;
mod query;
mod tables;

pub use analytics::AnalyticsReport;
pub use handlers::{DashboardState, get_analytics, get_dashboard_page};
pub use query::AnalyticsQuery;
