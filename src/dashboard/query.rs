//! The URL query parameters that carry the dashboard filters.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, filter::FilterState, time_range::TimeRange, user::UserID};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The dashboard filters as they appear in the query string, e.g.
/// `?range=custom&start=2024-01-01&end=2024-01-31&user=1&user=2&category=food`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// The time range, unknown values mean the last month.
    #[serde(default)]
    pub range: Option<String>,
    /// The start of a custom range, blank means unset.
    #[serde(default)]
    pub start: Option<String>,
    /// The end of a custom range, blank means unset.
    #[serde(default)]
    pub end: Option<String>,
    /// The selected user IDs.
    #[serde(default)]
    pub user: Vec<i64>,
    /// The selected categories.
    #[serde(default)]
    pub category: Vec<String>,
}

impl AnalyticsQuery {
    /// Build the filter state described by the query.
    ///
    /// Repeated users or categories are selected once.
    ///
    /// # Errors
    /// Returns [Error::InvalidFilterDate] if `start` or `end` is not blank and
    /// not a `YYYY-MM-DD` date.
    pub fn into_filter_state(self) -> Result<FilterState, Error> {
        let mut filters = FilterState::new();

        if let Some(range) = self.range {
            filters.set_time_range(TimeRange::from_query_value(range.trim()));
        }

        filters.set_custom_start(parse_filter_date(self.start.as_deref())?);
        filters.set_custom_end(parse_filter_date(self.end.as_deref())?);

        for user_id in self.user {
            let user_id = UserID::new(user_id);

            if !filters.selected_user_ids().contains(&user_id) {
                filters.toggle_user_selection(user_id);
            }
        }

        for category in self.category {
            if !filters.selected_categories().contains(&category) {
                filters.toggle_category_selection(&category);
            }
        }

        Ok(filters)
    }
}

fn parse_filter_date(text: Option<&str>) -> Result<Option<Date>, Error> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Date::parse(text, DATE_FORMAT)
            .map(Some)
            .map_err(|error| Error::InvalidFilterDate(error.to_string(), text.to_owned())),
    }
}

/// The query string for `filters` without the user and category selections.
pub fn time_filter_query_string(filters: &FilterState) -> String {
    let mut pairs = vec![("range", filters.time_range().as_query_value().to_owned())];

    if let Some(start) = filters.custom_start() {
        pairs.push(("start", start.to_string()));
    }

    if let Some(end) = filters.custom_end() {
        pairs.push(("end", end.to_string()));
    }

    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, filter::FilterState, time_range::TimeRange, user::UserID};

    use super::{AnalyticsQuery, time_filter_query_string};

    fn parse_query(text: &str) -> AnalyticsQuery {
        serde_html_form::from_str(text).unwrap()
    }

    #[test]
    fn empty_query_gives_default_filters() {
        let filters = parse_query("").into_filter_state().unwrap();

        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn query_handles_repeated_values() {
        let filters = parse_query("range=week&user=2&user=3&user=2&category=food&category=travel")
            .into_filter_state()
            .unwrap();

        assert_eq!(filters.time_range(), TimeRange::Week);
        assert_eq!(
            filters.selected_user_ids().iter().copied().collect::<Vec<_>>(),
            vec![UserID::new(2), UserID::new(3)]
        );
        assert_eq!(
            filters.selected_categories().iter().collect::<Vec<_>>(),
            vec!["food", "travel"]
        );
    }

    #[test]
    fn unknown_range_is_month() {
        let filters = parse_query("range=decade").into_filter_state().unwrap();

        assert_eq!(filters.time_range(), TimeRange::Month);
    }

    #[test]
    fn blank_dates_are_unset() {
        let filters = parse_query("range=custom&start=&end=2024-01-31")
            .into_filter_state()
            .unwrap();

        assert_eq!(filters.custom_start(), None);
        assert_eq!(filters.custom_end(), Some(date!(2024 - 01 - 31)));
        assert_eq!(filters.custom_bounds(), None);
    }

    #[test]
    fn malformed_date_is_an_error() {
        let result = parse_query("range=custom&start=31/01/2024").into_filter_state();

        assert!(
            matches!(result, Err(Error::InvalidFilterDate(_, ref date)) if date == "31/01/2024"),
            "got {result:?}"
        );
    }

    #[test]
    fn time_filter_query_string_drops_selections() {
        let mut filters = FilterState::new();
        filters.set_time_range(TimeRange::Custom);
        filters.set_custom_start(Some(date!(2024 - 01 - 01)));
        filters.set_custom_end(Some(date!(2024 - 01 - 31)));
        filters.toggle_user_selection(UserID::new(4));
        filters.toggle_category_selection("food");

        assert_eq!(
            time_filter_query_string(&filters),
            "range=custom&start=2024-01-01&end=2024-01-31"
        );
    }
}
