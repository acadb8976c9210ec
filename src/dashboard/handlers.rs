//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and the analytics JSON
//! - HTML view functions for rendering the dashboard UI
//! - The state used by the handlers

use std::{
    collections::BTreeSet,
    sync::{Arc, RwLock},
};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregator::ExpenseAggregator,
    app_state::{ExpenseData, snapshot},
    dashboard::{
        analytics::AnalyticsReport,
        cards::summary_cards_view,
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, expense_trend_chart,
        },
        filter_panel::{UserOption, filter_panel_view},
        policies::policies_panel_view,
        query::AnalyticsQuery,
        tables::recent_expenses_table,
    },
    expense::ExpenseRecord,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    policy::PolicyRecord,
    summary::{RECENT_EXPENSES_LIMIT, recent_expenses},
    timezone::local_today,
    user::{UserID, UserRecord},
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The most recently loaded expense data.
    pub expense_data: Arc<RwLock<ExpenseData>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_data: state.expense_data.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the expense dashboard filtered by the query parameters.
///
/// HTMX requests get only the dashboard content so the filter form can swap
/// it in place, errors included, which are returned as alerts.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let data = match load_dashboard_data(&state, query) {
        Ok(data) => data,
        Err(error) if is_htmx_request => return error.into_alert_response(),
        Err(error) => return error.into_response(),
    };

    let content = dashboard_content_view(&data);

    if is_htmx_request {
        content.into_response()
    } else {
        dashboard_view(&content).into_response()
    }
}

/// Get the filtered expenses and the aggregates for the query parameters as JSON.
pub async fn get_analytics(
    State(state): State<DashboardState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, Error> {
    let DashboardData {
        aggregator,
        policies,
        ..
    } = load_dashboard_data(&state, query)?;

    Ok(Json(AnalyticsReport::new(&aggregator, policies)))
}

/// The aggregated expenses plus the users and policies shown beside them.
struct DashboardData {
    aggregator: ExpenseAggregator,
    users: Vec<UserRecord>,
    policies: Vec<PolicyRecord>,
}

/// Runs the aggregator for `query` over a snapshot of the expense data.
///
/// # Errors
/// Returns an error if the query has an invalid date, the timezone is
/// invalid or the expense data lock is poisoned.
fn load_dashboard_data(
    state: &DashboardState,
    query: AnalyticsQuery,
) -> Result<DashboardData, Error> {
    let filters = query.into_filter_state()?;
    let today = local_today(&state.local_timezone)?;
    let ExpenseData {
        expenses,
        users,
        policies,
    } = snapshot(&state.expense_data)?;

    Ok(DashboardData {
        aggregator: ExpenseAggregator::with_filters(expenses, filters, today),
        users,
        policies,
    })
}

/// The users offered in the filter panel.
///
/// Falls back to the submitters of the expenses when no user list was loaded.
fn user_options(users: &[UserRecord], aggregator: &ExpenseAggregator) -> Vec<UserOption> {
    if !users.is_empty() {
        return users
            .iter()
            .map(|user| UserOption {
                id: user.id,
                name: user.display_name().to_owned(),
            })
            .collect();
    }

    submitter_ids(aggregator.expenses())
        .into_iter()
        .map(|id| UserOption {
            id,
            name: format!("User {id}"),
        })
        .collect()
}

fn submitter_ids(expenses: &[ExpenseRecord]) -> BTreeSet<UserID> {
    expenses.iter().map(|expense| expense.user_id).collect()
}

/// Renders the full dashboard page around `content`.
fn dashboard_view(content: &Markup) -> Markup {
    let content = html!(
        header class="w-full px-4 py-4 bg-white dark:bg-gray-800 shadow" {
            h1 class="text-2xl font-bold text-gray-900 dark:text-white" { "Expense Dashboard" }
        }

        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE) {
            (content)
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_URL.to_owned())];

    base("Dashboard", &scripts, &content)
}

/// Renders the dashboard content (cards, charts, filters, table and policies).
///
/// This is also the HTMX response when the filters change.
fn dashboard_content_view(data: &DashboardData) -> Markup {
    let DashboardData {
        aggregator,
        users,
        policies,
    } = data;

    if aggregator.expenses().is_empty() {
        return html!(
            div class="flex flex-col items-center px-6 py-8"
            {
                h2 class="text-xl font-bold" { "Nothing here yet..." }

                p { "Charts will show up here once expenses have been submitted." }
            }
        );
    }

    let time_range = aggregator.time_range();
    let charts = [
        DashboardChart {
            id: "expense-trend-chart",
            options: expense_trend_chart(aggregator.time_series(), time_range).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(aggregator.category_totals(), time_range).to_string(),
        },
    ];
    let team_size = if users.is_empty() {
        submitter_ids(aggregator.expenses()).len()
    } else {
        users.len()
    };

    html!(
        (summary_cards_view(&aggregator.summary(), team_size))
        (charts_view(&charts))
        (filter_panel_view(
            aggregator.filters(),
            &user_options(users, aggregator),
            aggregator.categories(),
        ))
        (recent_expenses_table(
            recent_expenses(aggregator.filtered_expenses(), RECENT_EXPENSES_LIMIT),
            users,
        ))
        (policies_panel_view(policies))
        (charts_script(&charts))
    )
}
