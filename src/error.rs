//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    alert::Alert, expense::ExpenseId, html::error_view,
    internal_server_error::InternalServerError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An expense date could not be parsed as a date or a date-time.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not parse expense date \"{1}\": {0}")]
    InvalidExpenseDate(String, String),

    /// An expense had an amount less than zero.
    #[error("expense {0} has a negative amount {1}")]
    NegativeAmount(ExpenseId, f64),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The user list was not a JSON array of users.
    #[error("Could not parse the users JSON: {0}")]
    InvalidUsersJSON(String),

    /// The policy list was not a JSON array of policies.
    #[error("Could not parse the policies JSON: {0}")]
    InvalidPoliciesJSON(String),

    /// A data file could not be read.
    ///
    /// Callers should pass in the file path and the original error as a string.
    #[error("could not read \"{0}\": {1}")]
    ReadError(String, String),

    /// A date in the dashboard filters could not be parsed.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("invalid filter date \"{1}\": {0}")]
    InvalidFilterDate(String, String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on the shared expense data.
    #[error("could not acquire the expense data lock")]
    DataLockError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidFilterDate(error, date) => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Bad Request",
                        "400",
                        "Invalid Filter Date",
                        &format!(
                            "Could not read the date \"{date}\" ({error}). \
                            Dates should look like 2024-01-31."
                        ),
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DataLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidFilterDate(error, date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid filter date".to_owned(),
                    details: format!(
                        "Could not read the date \"{date}\" ({error}). \
                        Dates should look like 2024-01-31."
                    ),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn invalid_filter_date_is_bad_request() {
        let error = || Error::InvalidFilterDate("bad month".to_owned(), "2024-13-01".to_owned());

        assert_eq!(error().into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error().into_alert_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn data_errors_are_internal_server_errors() {
        let response = Error::DataLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_messages_include_context() {
        assert_eq!(
            Error::NegativeAmount(4, -2.5).to_string(),
            "expense 4 has a negative amount -2.5"
        );
        assert_eq!(
            Error::ReadError("expenses.csv".to_owned(), "not found".to_owned()).to_string(),
            "could not read \"expenses.csv\": not found"
        );
    }
}
