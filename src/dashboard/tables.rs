//! The recent expenses table.

use maud::{Markup, html};
use time::Date;

use crate::{
    expense::{ExpenseRecord, category_label},
    html::{
        APPROVED_BADGE_STYLE, BADGE_STYLE, FLAGGED_BADGE_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    time_range::month_abbrev,
    user::{UserRecord, user_display_name},
};

/// Renders a table of `expenses`, labelling submitters with names from `users`.
pub(super) fn recent_expenses_table(expenses: &[ExpenseRecord], users: &[UserRecord]) -> Markup {
    html! {
        section id="recent-expenses" class="w-full mx-auto mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Recent Expenses" }

            div class="relative overflow-x-auto shadow-md rounded-lg" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Employee" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        }
                    }

                    tbody {
                        @for expense in expenses {
                            tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id) {
                                td class=(TABLE_CELL_STYLE) {
                                    (user_display_name(users, expense.user_id))
                                }
                                td class=(TABLE_CELL_STYLE) {
                                    span class=(BADGE_STYLE) { (category_label(&expense.category)) }
                                }
                                td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                                td class=(TABLE_CELL_STYLE) { (format_date(expense.date)) }
                                td class=(TABLE_CELL_STYLE) {
                                    @if expense.flagged {
                                        span
                                            class=(FLAGGED_BADGE_STYLE)
                                            title=[expense.flag_reason.as_deref()]
                                        {
                                            "Flagged"
                                        }
                                    } @else {
                                        span class=(APPROVED_BADGE_STYLE) { "Approved" }
                                    }
                                }
                            }
                        }

                        @if expenses.is_empty() {
                            tr class=(TABLE_ROW_STYLE) {
                                td colspan="5" class=(TABLE_CELL_STYLE) {
                                    "No expenses match the current filters."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Formats a date like "Jan 05, 2024".
fn format_date(date: Date) -> String {
    format!(
        "{} {:02}, {}",
        month_abbrev(date.month()),
        date.day(),
        date.year()
    )
}
