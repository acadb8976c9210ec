//! The read-only list of company policies.

use maud::{Markup, html};

use crate::{
    expense::category_label,
    html::BADGE_STYLE,
    policy::{DASHBOARD_POLICY_LIMIT, PolicyRecord},
};

/// Renders the first few `policies` with their restrictions.
pub(super) fn policies_panel_view(policies: &[PolicyRecord]) -> Markup {
    let shown = &policies[..policies.len().min(DASHBOARD_POLICY_LIMIT)];

    html! {
        section id="policies" class="w-full mx-auto mb-4" {
            div class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
            {
                h3 class="text-xl font-semibold mb-4" { "Company Policies" }

                @if shown.is_empty() {
                    p class="text-center py-6 text-gray-500 dark:text-gray-400" {
                        "No company policies found"
                    }
                } @else {
                    ul class="divide-y divide-gray-200 dark:divide-gray-700" {
                        @for policy in shown {
                            li class="py-3" data-policy-id=(policy.id) {
                                h4 class="font-medium" { (policy.name) }

                                @if let Some(description) = &policy.description {
                                    p class="text-sm text-gray-600 dark:text-gray-400 mt-1" {
                                        (description)
                                    }
                                }

                                div class="flex items-center gap-2 mt-2" {
                                    span class=(BADGE_STYLE) { (category_label(&policy.category)) }
                                    span class="text-xs text-gray-500 dark:text-gray-400" {
                                        "Restriction: " (policy.restriction_label())
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
