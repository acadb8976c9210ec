//! The filter controls for the dashboard.
//!
//! The whole panel is a single form. Any change re-requests the dashboard
//! with the form values as query parameters and HTMX swaps the new content in.

use maud::{Markup, html};

use crate::{
    dashboard::query::time_filter_query_string,
    endpoints,
    expense::category_label,
    filter::FilterState,
    html::{FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE},
    time_range::TimeRange,
    user::UserID,
};

/// A user that can be selected in the filter panel.
pub(super) struct UserOption {
    pub id: UserID,
    pub name: String,
}

/// Renders the filter form for `filters`.
pub(super) fn filter_panel_view(
    filters: &FilterState,
    users: &[UserOption],
    categories: &[String],
) -> Markup {
    let dashboard_endpoint = endpoints::DASHBOARD_VIEW;
    let clear_url = format!(
        "{}?{}",
        endpoints::DASHBOARD_VIEW,
        time_filter_query_string(filters)
    );
    let has_selections =
        !filters.selected_user_ids().is_empty() || !filters.selected_categories().is_empty();

    html! {
        section id="filters" class="w-full mb-4" {
            form
                hx-get=(dashboard_endpoint)
                hx-target="#dashboard-content"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                hx-trigger="change"
                hx-push-url="true"
                class="bg-gray-50 dark:bg-gray-800 p-4 rounded-lg space-y-4"
            {
                div class="flex justify-between items-baseline" {
                    h3 class="text-xl font-semibold" { "Filters" }

                    @if has_selections {
                        a
                            href=(clear_url)
                            hx-get=(clear_url)
                            hx-target="#dashboard-content"
                            hx-swap="innerHTML"
                            hx-push-url="true"
                            class=(LINK_STYLE)
                        {
                            "Clear all"
                        }
                    }
                }

                div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                    div {
                        label for="range" class=(FORM_LABEL_STYLE) { "Time Range" }

                        select id="range" name="range" class=(FORM_TEXT_INPUT_STYLE) {
                            @for time_range in TimeRange::ALL {
                                option
                                    value=(time_range.as_query_value())
                                    selected[time_range == filters.time_range()]
                                {
                                    (time_range.label())
                                }
                            }
                        }
                    }

                    @if filters.time_range() == TimeRange::Custom {
                        div {
                            label for="start" class=(FORM_LABEL_STYLE) { "Start Date" }
                            input
                                type="date"
                                id="start"
                                name="start"
                                value=[filters.custom_start().map(|date| date.to_string())]
                                class=(FORM_TEXT_INPUT_STYLE);
                        }

                        div {
                            label for="end" class=(FORM_LABEL_STYLE) { "End Date" }
                            input
                                type="date"
                                id="end"
                                name="end"
                                value=[filters.custom_end().map(|date| date.to_string())]
                                class=(FORM_TEXT_INPUT_STYLE);
                        }
                    }
                }

                @if !users.is_empty() {
                    fieldset {
                        legend class=(FORM_LABEL_STYLE) { "Team Members" }

                        div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-3" {
                            @for user in users {
                                label class="flex items-center space-x-2" {
                                    input
                                        type="checkbox"
                                        name="user"
                                        value=(user.id.as_i64())
                                        checked[filters.selected_user_ids().contains(&user.id)]
                                        class=(FORM_CHECKBOX_STYLE);

                                    span { (&user.name) }
                                }
                            }
                        }
                    }
                }

                @if !categories.is_empty() {
                    fieldset {
                        legend class=(FORM_LABEL_STYLE) { "Categories" }

                        div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-3" {
                            @for category in categories {
                                label class="flex items-center space-x-2" {
                                    input
                                        type="checkbox"
                                        name="category"
                                        value=(category)
                                        checked[filters.selected_categories().contains(category)]
                                        class=(FORM_CHECKBOX_STYLE);

                                    span { (category_label(category)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{filter::FilterState, time_range::TimeRange, user::UserID};

    use super::{UserOption, filter_panel_view};

    fn render(filters: &FilterState) -> Html {
        let users = [
            UserOption {
                id: UserID::new(1),
                name: "Ada".to_owned(),
            },
            UserOption {
                id: UserID::new(2),
                name: "Bob".to_owned(),
            },
        ];
        let categories = vec!["travel".to_owned(), "food".to_owned()];

        Html::parse_fragment(&filter_panel_view(filters, &users, &categories).into_string())
    }

    fn checked_values(html: &Html, name: &str) -> Vec<String> {
        let selector = Selector::parse(&format!("input[name='{name}'][checked]")).unwrap();

        html.select(&selector)
            .filter_map(|input| input.value().attr("value"))
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn date_inputs_only_shown_for_custom_range() {
        let html = render(&FilterState::new());
        let selector = Selector::parse("input[type='date']").unwrap();
        assert_eq!(html.select(&selector).count(), 0);

        let mut filters = FilterState::new();
        filters.set_time_range(TimeRange::Custom);
        filters.set_custom_start(Some(date!(2024 - 01 - 01)));
        let html = render(&filters);

        let values: Vec<_> = html
            .select(&selector)
            .map(|input| input.value().attr("value"))
            .collect();
        assert_eq!(values, vec![Some("2024-01-01"), None]);
    }

    #[test]
    fn selected_range_is_marked() {
        let mut filters = FilterState::new();
        filters.set_time_range(TimeRange::Quarter);
        let html = render(&filters);

        let selector = Selector::parse("select[name='range'] option[selected]").unwrap();
        let selected: Vec<_> = html
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(selected, vec!["quarter"]);
    }

    #[test]
    fn selections_are_checked() {
        let mut filters = FilterState::new();
        filters.toggle_user_selection(UserID::new(2));
        filters.toggle_category_selection("food");
        let html = render(&filters);

        assert_eq!(checked_values(&html, "user"), vec!["2"]);
        assert_eq!(checked_values(&html, "category"), vec!["food"]);
    }

    #[test]
    fn clear_all_link_keeps_time_range() {
        let html = render(&FilterState::new());
        let selector = Selector::parse("a[hx-get]").unwrap();
        assert_eq!(html.select(&selector).count(), 0);

        let mut filters = FilterState::new();
        filters.set_time_range(TimeRange::Week);
        filters.toggle_category_selection("travel");
        let html = render(&filters);

        let links: Vec<_> = html
            .select(&selector)
            .filter_map(|link| link.value().attr("href"))
            .collect();
        assert_eq!(links, vec!["/dashboard?range=week"]);
    }
}
