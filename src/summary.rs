//! Totals shown on the dashboard summary cards and the recent expenses table.

use serde::Serialize;

use crate::expense::ExpenseRecord;

/// The number of expenses shown in the recent expenses table.
pub const RECENT_EXPENSES_LIMIT: usize = 5;

/// Totals over a set of expenses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExpenseSummary {
    /// The sum of all expense amounts.
    pub total_amount: f64,
    /// The number of expenses.
    pub expense_count: usize,
    /// The sum of the flagged expense amounts.
    pub flagged_amount: f64,
    /// The number of flagged expenses.
    pub flagged_count: usize,
}

/// Calculate the totals for `expenses`.
pub fn summarize(expenses: &[ExpenseRecord]) -> ExpenseSummary {
    expenses
        .iter()
        .fold(ExpenseSummary::default(), |mut summary, expense| {
            summary.total_amount += expense.amount;
            summary.expense_count += 1;

            if expense.flagged {
                summary.flagged_amount += expense.amount;
                summary.flagged_count += 1;
            }

            summary
        })
}

/// The first `limit` expenses, in the order they were given.
pub fn recent_expenses(expenses: &[ExpenseRecord], limit: usize) -> &[ExpenseRecord] {
    &expenses[..limit.min(expenses.len())]
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{expense::ExpenseRecord, user::UserID};

    use super::{ExpenseSummary, recent_expenses, summarize};

    fn expense(id: i64, amount: f64) -> ExpenseRecord {
        ExpenseRecord::new(id, UserID::new(1), "general", amount, date!(2024 - 05 - 01))
    }

    #[test]
    fn summarizes_totals_and_flags() {
        let expenses = vec![
            expense(1, 100.0),
            expense(2, 20.5).flagged("over limit"),
            expense(3, 4.5).flagged("blacklisted merchant"),
        ];

        let summary = summarize(&expenses);

        assert_eq!(
            summary,
            ExpenseSummary {
                total_amount: 125.0,
                expense_count: 3,
                flagged_amount: 25.0,
                flagged_count: 2,
            }
        );
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(summarize(&[]), ExpenseSummary::default());
    }

    #[test]
    fn recent_expenses_takes_first_entries() {
        let expenses: Vec<_> = (1..=7).map(|id| expense(id, 1.0)).collect();

        let recent = recent_expenses(&expenses, 5);

        let ids: Vec<_> = recent.iter().map(|expense| expense.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn recent_expenses_handles_short_lists() {
        let expenses = vec![expense(1, 1.0)];

        assert_eq!(recent_expenses(&expenses, 5).len(), 1);
    }
}
