//! The coarse time windows the dashboard can show and the chart bucket used
//! for each of them.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, Weekday};

/// Weekday bucket keys in the order they are charted.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The window of time to show expenses for, relative to today.
///
/// Deserializing an unrecognised value yields [TimeRange::Month].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TimeRange {
    /// The last seven days.
    Week,
    /// The last calendar month.
    #[default]
    Month,
    /// The last three calendar months.
    Quarter,
    /// The last calendar year.
    Year,
    /// A user supplied start and end date.
    Custom,
}

impl TimeRange {
    /// All time ranges in the order they are offered to the user.
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
        TimeRange::Custom,
    ];

    /// Parse a query value, falling back to [TimeRange::Month] for anything
    /// that is not a known range.
    pub fn from_query_value(value: &str) -> Self {
        match value {
            "week" => Self::Week,
            "month" => Self::Month,
            "quarter" => Self::Quarter,
            "year" => Self::Year,
            "custom" => Self::Custom,
            _ => Self::Month,
        }
    }

    /// The value used for this range in URL query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::Custom => "custom",
        }
    }

    /// The human readable name of the range.
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Last Week",
            Self::Month => "Last Month",
            Self::Quarter => "Last Quarter",
            Self::Year => "Last Year",
            Self::Custom => "Custom Range",
        }
    }

    /// The date expenses must fall strictly after to be shown.
    ///
    /// Returns `None` for [TimeRange::Custom] since custom ranges are bounded
    /// by the user's dates instead. Also `None` when the cutoff would be
    /// before the earliest representable date, i.e. there is no lower bound.
    pub fn cutoff(self, today: Date) -> Option<Date> {
        match self {
            Self::Week => today.checked_sub(Duration::days(7)),
            Self::Month => months_before(today, 1),
            Self::Quarter => months_before(today, 3),
            Self::Year => months_before(today, 12),
            Self::Custom => None,
        }
    }

    /// The chart bucket `date` falls into for this range.
    ///
    /// - Week: weekday abbreviation, e.g. "Mon"
    /// - Month: two digit day of month, e.g. "07"
    /// - Quarter: month abbreviation, e.g. "Jan"
    /// - Year and custom: month and two digit year, e.g. "Jan 24"
    pub fn bucket_key(self, date: Date) -> String {
        match self {
            Self::Week => weekday_abbrev(date.weekday()).to_owned(),
            Self::Month => format!("{:02}", date.day()),
            Self::Quarter => month_abbrev(date.month()).to_owned(),
            Self::Year | Self::Custom => format!(
                "{} {:02}",
                month_abbrev(date.month()),
                date.year().rem_euclid(100)
            ),
        }
    }
}

impl From<String> for TimeRange {
    fn from(value: String) -> Self {
        Self::from_query_value(&value)
    }
}

/// Subtract `months` calendar months from `date`.
///
/// The day is clamped to the length of the resulting month, so 31 March minus
/// one month is the last day of February. Returns `None` if the result is out
/// of the range of [Date].
pub fn months_before(date: Date, months: u32) -> Option<Date> {
    let month_index = (date.year() * 12 + i32::from(u8::from(date.month())) - 1)
        .checked_sub(i32::try_from(months).ok()?)?;
    let year = month_index.div_euclid(12);
    let month = Month::try_from(u8::try_from(month_index.rem_euclid(12) + 1).ok()?).ok()?;
    let day = date.day().min(last_day_of_month(year, month));

    Date::from_calendar_date(year, month, day).ok()
}

/// The position of a weekday bucket key in [WEEKDAY_LABELS].
///
/// Unknown keys sort last.
pub fn weekday_position(key: &str) -> usize {
    WEEKDAY_LABELS
        .iter()
        .position(|label| *label == key)
        .unwrap_or(WEEKDAY_LABELS.len())
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub(crate) fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.number_days_from_sunday() as usize]
}
