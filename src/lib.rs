//! Expense analytics is a web dashboard for exploring a company's submitted
//! expenses.
//!
//! Expenses are loaded from a CSV file, users and company policies from JSON
//! files. The dashboard filters the expenses by time range, submitter and
//! category, then shows summary totals, a trend chart, a category breakdown,
//! the most recent matching expenses and a few of the company's policies.
//!
//! This library provides a REST API that directly serves HTML pages, plus a
//! JSON endpoint with the same aggregates.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregator;
mod alert;
mod app_state;
mod dashboard;
mod data_source;
mod endpoints;
mod error;
mod expense;
mod filter;
mod html;
mod import;
mod internal_server_error;
mod logging;
mod not_found;
mod policy;
mod routing;
mod summary;
mod time_range;
mod timezone;
mod user;

pub use aggregator::{
    CategoryTotal, ExpenseAggregator, TimeSeriesPoint, category_totals, distinct_categories,
    filter_expenses, time_series,
};
pub use app_state::{AppState, ExpenseData};
pub use dashboard::{AnalyticsQuery, AnalyticsReport, DashboardState};
pub use data_source::{DataSource, refresh_periodically};
pub use error::Error;
pub use expense::{CATEGORIES, ExpenseId, ExpenseRecord, category_label};
pub use filter::FilterState;
pub use import::{load_expenses, parse_expenses_csv};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use policy::{
    DASHBOARD_POLICY_LIMIT, PolicyRecord, PolicyType, load_policies, parse_policies_json,
};
pub use routing::build_router;
pub use summary::{ExpenseSummary, RECENT_EXPENSES_LIMIT, recent_expenses, summarize};
pub use time_range::TimeRange;
pub use timezone::local_today;
pub use user::{UserID, UserRecord, load_users, parse_users_json};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
