//! The user controlled filter state for the expense dashboard.

use std::collections::BTreeSet;

use time::Date;

use crate::{time_range::TimeRange, user::UserID};

/// Which expenses the dashboard should show.
///
/// A new filter state shows the last month of expenses for all users and all
/// categories. The state only changes through its setters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    time_range: TimeRange,
    custom_start: Option<Date>,
    custom_end: Option<Date>,
    selected_user_ids: BTreeSet<UserID>,
    selected_categories: BTreeSet<String>,
}

impl FilterState {
    /// Create a filter state with the default last month range.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected time range.
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// The start of the custom range, if set.
    pub fn custom_start(&self) -> Option<Date> {
        self.custom_start
    }

    /// The end of the custom range, if set.
    pub fn custom_end(&self) -> Option<Date> {
        self.custom_end
    }

    /// The users to show expenses for. Empty means all users.
    pub fn selected_user_ids(&self) -> &BTreeSet<UserID> {
        &self.selected_user_ids
    }

    /// The categories to show expenses for. Empty means all categories.
    pub fn selected_categories(&self) -> &BTreeSet<String> {
        &self.selected_categories
    }

    /// Set the time range. Custom dates and selections are kept.
    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.time_range = time_range;
    }

    /// Set the start of the custom range, exclusive.
    ///
    /// Only used when the time range is [TimeRange::Custom].
    pub fn set_custom_start(&mut self, date: Option<Date>) {
        self.custom_start = date;
    }

    /// Set the end of the custom range, inclusive.
    ///
    /// Only used when the time range is [TimeRange::Custom].
    pub fn set_custom_end(&mut self, date: Option<Date>) {
        self.custom_end = date;
    }

    /// Select `user_id` if it is not selected, otherwise deselect it.
    pub fn toggle_user_selection(&mut self, user_id: UserID) {
        if !self.selected_user_ids.remove(&user_id) {
            self.selected_user_ids.insert(user_id);
        }
    }

    /// Select `category` if it is not selected, otherwise deselect it.
    pub fn toggle_category_selection(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_owned());
        }
    }

    /// Deselect all users and categories.
    ///
    /// The time range and custom dates are left as they are.
    pub fn clear_filters(&mut self) {
        self.selected_user_ids.clear();
        self.selected_categories.clear();
    }

    /// The custom (start, end) dates if the time range is custom and both
    /// dates have been set.
    pub fn custom_bounds(&self) -> Option<(Date, Date)> {
        match (self.time_range, self.custom_start, self.custom_end) {
            (TimeRange::Custom, Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}
