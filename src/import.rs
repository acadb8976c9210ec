//! Loading expense records from CSV files.
//!
//! The expected header is:
//!
//! ```text
//! id,user_id,category,amount,date[,merchant,description,flagged,flag_reason]
//! ```
//!
//! The trailing columns are optional. Dates are either plain calendar dates
//! (`2024-01-15`) or date-times (`2024-01-15T09:30:00Z`), in which case only
//! the date part is kept.

use std::path::Path;

use serde::Deserialize;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{
        BorrowedFormatItem,
        well_known::{Iso8601, Rfc3339},
    },
    macros::format_description,
};

use crate::{
    Error,
    expense::{ExpenseId, ExpenseRecord},
    user::UserID,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A row of the expenses CSV before validation.
#[derive(Debug, Deserialize)]
struct ExpenseRow {
    id: ExpenseId,
    user_id: i64,
    category: String,
    amount: f64,
    date: String,
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    flagged: Option<bool>,
    #[serde(default)]
    flag_reason: Option<String>,
}

impl TryFrom<ExpenseRow> for ExpenseRecord {
    type Error = Error;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        if row.amount.is_nan() || row.amount < 0.0 {
            return Err(Error::NegativeAmount(row.id, row.amount));
        }

        let date = parse_expense_date(row.date.trim())?;

        Ok(ExpenseRecord {
            id: row.id,
            user_id: UserID::new(row.user_id),
            category: row.category,
            amount: row.amount,
            date,
            merchant: row.merchant.unwrap_or_default(),
            description: row.description.filter(|text| !text.is_empty()),
            flagged: row.flagged.unwrap_or(false),
            flag_reason: row.flag_reason.filter(|text| !text.is_empty()),
        })
    }
}

/// Parses the expense records in `text`, keeping the order of the rows.
///
/// Every row must be valid, nothing is skipped.
///
/// # Errors
/// - [Error::InvalidCSV] if the header is missing a required column or a row
///   has the wrong shape.
/// - [Error::InvalidExpenseDate] if a date is not a date or a date-time.
/// - [Error::NegativeAmount] if an amount is less than zero.
pub fn parse_expenses_csv(text: &str) -> Result<Vec<ExpenseRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    reader
        .deserialize::<ExpenseRow>()
        .map(|row| {
            row.map_err(|error| Error::InvalidCSV(error.to_string()))
                .and_then(ExpenseRecord::try_from)
        })
        .collect()
}

/// Read and parse the expenses CSV file at `path`.
///
/// # Errors
/// Returns [Error::ReadError] if the file cannot be read, otherwise see
/// [parse_expenses_csv].
pub fn load_expenses(path: &Path) -> Result<Vec<ExpenseRecord>, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| Error::ReadError(path.display().to_string(), error.to_string()))?;

    let expenses = parse_expenses_csv(&text)?;
    tracing::debug!("Loaded {} expenses from {}", expenses.len(), path.display());

    Ok(expenses)
}

fn parse_expense_date(text: &str) -> Result<Date, Error> {
    let date_error = match Date::parse(text, DATE_FORMAT) {
        Ok(date) => return Ok(date),
        Err(error) => error,
    };

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time.date());
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(text, &Iso8601::DEFAULT) {
        return Ok(date_time.date());
    }

    Err(Error::InvalidExpenseDate(
        date_error.to_string(),
        text.to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, expense::ExpenseRecord, user::UserID};

    use super::{parse_expense_date, parse_expenses_csv};

    #[test]
    fn parses_required_columns() {
        let text = "id,user_id,category,amount,date\n\
            1,7,travel,120.50,2024-01-15\n\
            2,8,food,18,2024-01-16\n";

        let expenses = parse_expenses_csv(text).unwrap();

        assert_eq!(
            expenses,
            vec![
                ExpenseRecord::new(1, UserID::new(7), "travel", 120.5, date!(2024 - 01 - 15)),
                ExpenseRecord::new(2, UserID::new(8), "food", 18.0, date!(2024 - 01 - 16)),
            ]
        );
    }

    #[test]
    fn parses_optional_columns() {
        let text = "id,user_id,category,amount,date,merchant,description,flagged,flag_reason\n\
            1,7,travel,950,2024-01-15,Air NZ,Flight to conference,true,Over limit\n\
            2,7,food,12,2024-01-15,Cafe,,false,\n";

        let expenses = parse_expenses_csv(text).unwrap();

        assert_eq!(expenses[0].merchant, "Air NZ");
        assert_eq!(
            expenses[0].description.as_deref(),
            Some("Flight to conference")
        );
        assert!(expenses[0].flagged);
        assert_eq!(expenses[0].flag_reason.as_deref(), Some("Over limit"));
        assert_eq!(expenses[1].description, None);
        assert!(!expenses[1].flagged);
        assert_eq!(expenses[1].flag_reason, None);
    }

    #[test]
    fn empty_file_with_header_has_no_expenses() {
        let expenses = parse_expenses_csv("id,user_id,category,amount,date\n").unwrap();

        assert!(expenses.is_empty());
    }

    #[test]
    fn date_times_keep_the_date() {
        assert_eq!(
            parse_expense_date("2024-01-15T23:30:00Z"),
            Ok(date!(2024 - 01 - 15))
        );
        assert_eq!(
            parse_expense_date("2024-01-15T23:30:00+13:00"),
            Ok(date!(2024 - 01 - 15))
        );
        assert_eq!(
            parse_expense_date("2024-01-15T08:00:00"),
            Ok(date!(2024 - 01 - 15))
        );
    }

    #[test]
    fn rejects_malformed_date() {
        let text = "id,user_id,category,amount,date\n1,7,travel,10,15/01/2024\n";

        let result = parse_expenses_csv(text);

        assert!(
            matches!(result, Err(Error::InvalidExpenseDate(_, ref date)) if date == "15/01/2024"),
            "got {result:?}"
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let text = "id,user_id,category,amount,date\n3,7,travel,-10,2024-01-15\n";

        assert_eq!(
            parse_expenses_csv(text),
            Err(Error::NegativeAmount(3, -10.0))
        );
    }

    #[test]
    fn rejects_missing_columns() {
        let text = "id,user_id,category,amount\n1,7,travel,10\n";

        assert!(matches!(parse_expenses_csv(text), Err(Error::InvalidCSV(_))));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let text = "id,user_id,category,amount,date\n1,7,travel,ten,2024-01-15\n";

        assert!(matches!(parse_expenses_csv(text), Err(Error::InvalidCSV(_))));
    }
}
