//! Summary cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{html::format_currency, summary::ExpenseSummary};

/// Renders the total, flagged and team member cards.
pub(super) fn summary_cards_view(summary: &ExpenseSummary, team_size: usize) -> Markup {
    html! {
        section id="summary-cards" class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                (summary_card(
                    "Total Expenses",
                    &format_currency(summary.total_amount),
                    &count_label(summary.expense_count, "expense", "expenses"),
                ))
                (summary_card(
                    "Flagged Expenses",
                    &format_currency(summary.flagged_amount),
                    &count_label(summary.flagged_count, "expense", "expenses"),
                ))
                (summary_card(
                    "Team Members",
                    &team_size.to_string(),
                    "Active users",
                ))
            }
        }
    }
}

fn summary_card(title: &str, value: &str, caption: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            data-card=(title)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p class="mt-2 text-2xl font-bold" { (value) }
            p class="mt-1 text-xs text-gray-500 dark:text-gray-400" { (caption) }
        }
    }
}

fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
