//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, RwLock};

use crate::{
    Error, expense::ExpenseRecord, policy::PolicyRecord, timezone::get_local_offset,
    user::UserRecord,
};

/// The expenses, users and policies served by the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseData {
    /// All expenses, in the order they were loaded.
    pub expenses: Vec<ExpenseRecord>,
    /// The users that submitted the expenses, may be empty.
    pub users: Vec<UserRecord>,
    /// The company's expense policies, may be empty.
    pub policies: Vec<PolicyRecord>,
}

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The most recently loaded expense data.
    pub expense_data: Arc<RwLock<ExpenseData>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] serving `expense_data`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(expense_data: ExpenseData, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            expense_data: Arc::new(RwLock::new(expense_data)),
            local_timezone: local_timezone.to_owned(),
        })
    }

    /// Swap in freshly loaded expense data.
    ///
    /// # Errors
    /// Returns [Error::DataLockError] if the lock is poisoned.
    pub fn replace_expense_data(&self, expense_data: ExpenseData) -> Result<(), Error> {
        let mut current = self
            .expense_data
            .write()
            .inspect_err(|error| tracing::error!("could not acquire expense data lock: {error}"))
            .map_err(|_| Error::DataLockError)?;

        *current = expense_data;

        Ok(())
    }
}

/// Copy the data behind `expense_data` so the lock is not held while rendering.
///
/// # Errors
/// Returns [Error::DataLockError] if the lock is poisoned.
pub fn snapshot(expense_data: &RwLock<ExpenseData>) -> Result<ExpenseData, Error> {
    expense_data
        .read()
        .inspect_err(|error| tracing::error!("could not acquire expense data lock: {error}"))
        .map(|data| data.clone())
        .map_err(|_| Error::DataLockError)
}
