//! Reading the expense, user and policy files from disk, and keeping the server's
//! copy of them up to date.

use std::{path::PathBuf, time::Duration};

use crate::{
    AppState, Error,
    app_state::ExpenseData,
    import::load_expenses,
    policy::load_policies,
    user::load_users,
};

/// Where the dashboard's data lives on disk.
#[derive(Debug, Clone)]
pub struct DataSource {
    /// Path to the expenses CSV file.
    pub expenses_path: PathBuf,
    /// Path to the users JSON file, if there is one.
    pub users_path: Option<PathBuf>,
    /// Path to the policies JSON file, if there is one.
    pub policies_path: Option<PathBuf>,
}

impl DataSource {
    /// Read and parse the expense, user and policy files.
    ///
    /// # Errors
    /// Returns an error if any file cannot be read or parsed. Partial
    /// results are never returned.
    pub fn load(&self) -> Result<ExpenseData, Error> {
        let expenses = load_expenses(&self.expenses_path)?;
        let users = match &self.users_path {
            Some(path) => load_users(path)?,
            None => Vec::new(),
        };
        let policies = match &self.policies_path {
            Some(path) => load_policies(path)?,
            None => Vec::new(),
        };

        Ok(ExpenseData {
            expenses,
            users,
            policies,
        })
    }
}

/// Reload the data from `source` into `state` every `period`.
///
/// The first reload happens one `period` after this is called. If a reload
/// fails the error is logged and the previously loaded data is kept.
pub async fn refresh_periodically(state: AppState, source: DataSource, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;

        if let Err(error) = refresh(&state, &source).await {
            tracing::error!("Could not refresh expense data, keeping previous data: {error}");
        }
    }
}

async fn refresh(state: &AppState, source: &DataSource) -> Result<(), Error> {
    let source = source.clone();
    let expense_data = tokio::task::spawn_blocking(move || source.load())
        .await
        .map_err(|error| Error::ReadError("expense data".to_owned(), error.to_string()))??;

    tracing::info!(
        "Refreshed expense data: {} expenses, {} users, {} policies",
        expense_data.expenses.len(),
        expense_data.users.len(),
        expense_data.policies.len()
    );

    state.replace_expense_data(expense_data)
}
