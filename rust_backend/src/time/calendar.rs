use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use std::fmt;

/// Timestamp layouts accepted in the `Start Time` / `End Time` columns.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Sentinel accepted by both filter vocabularies to mean "no filter".
pub const ALL_SENTINEL: &str = "all";

/// Parse a trip timestamp such as `2017-06-23 15:09:32`.
///
/// # Returns
/// * `Some(NaiveDateTime)` for any of the accepted layouts
/// * `None` when the text is blank or not a timestamp
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Months covered by the trip datasets (January through June).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar month number, 1-based.
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn from_number(number: u32) -> Option<Month> {
        Month::ALL.get((number as usize).checked_sub(1)?).copied()
    }

    /// Lower-case month name as used in the filter vocabulary.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    /// Case-insensitive lookup by full month name.
    pub fn from_name(name: &str) -> Option<Month> {
        let name = name.trim().to_lowercase();
        Month::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Zero-based position within the dataset range.
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// Day of the week in the standard Monday..Sunday ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Canonical capitalised name, e.g. `"Monday"`.
    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Case-insensitive match against the canonical name.
    pub fn from_name(name: &str) -> Option<DayOfWeek> {
        let name = name.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendar fields derived once from a trip's start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub month: Month,
    pub weekday: DayOfWeek,
    pub hour: u32,
}

impl CalendarFields {
    /// Derive month, weekday and hour. Returns `None` when the month falls
    /// outside the January..June coverage of the datasets.
    pub fn derive(start_time: &NaiveDateTime) -> Option<Self> {
        Some(Self {
            month: Month::from_number(start_time.month())?,
            weekday: start_time.weekday().into(),
            hour: start_time.hour(),
        })
    }
}

/// Parse a month filter word: a month name, or `all` for no filter.
pub fn parse_month_filter(text: &str) -> Option<Option<Month>> {
    if text.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
        return Some(None);
    }
    Month::from_name(text).map(Some)
}

/// Parse a weekday filter word: a weekday name, or `all` for no filter.
pub fn parse_day_filter(text: &str) -> Option<Option<DayOfWeek>> {
    if text.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
        return Some(None);
    }
    DayOfWeek::from_name(text).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_timestamp_layouts() {
        let expected = NaiveDate::from_ymd_opt(2017, 6, 23)
            .unwrap()
            .and_hms_opt(15, 9, 32)
            .unwrap();

        assert_eq!(parse_timestamp("2017-06-23 15:09:32"), Some(expected));
        assert_eq!(parse_timestamp("2017-06-23T15:09:32"), Some(expected));
        assert_eq!(parse_timestamp("  2017-06-23 15:09:32 "), Some(expected));

        let fractional = parse_timestamp("2017-06-23 15:09:32.250").unwrap();
        assert_eq!(fractional.hour(), 15);
        assert_eq!(fractional.second(), 32);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2017-13-01 00:00:00"), None);
    }

    #[test]
    fn test_month_vocabulary() {
        assert_eq!(Month::from_name("January"), Some(Month::January));
        assert_eq!(Month::from_name(" june "), Some(Month::June));
        assert_eq!(Month::from_name("july"), None);
        assert_eq!(Month::from_number(3), Some(Month::March));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(7), None);
        assert_eq!(Month::May.to_string(), "May");
    }

    #[test]
    fn test_weekday_vocabulary() {
        assert_eq!(DayOfWeek::from_name("sunday"), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::from_name("FRIDAY"), Some(DayOfWeek::Friday));
        assert_eq!(DayOfWeek::from_name("fri"), None);
        assert_eq!(DayOfWeek::from(Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from(Weekday::Sun), DayOfWeek::Sunday);
    }

    #[test]
    fn test_filter_words() {
        assert_eq!(parse_month_filter("ALL"), Some(None));
        assert_eq!(parse_month_filter("march"), Some(Some(Month::March)));
        assert_eq!(parse_month_filter("december"), None);
        assert_eq!(parse_day_filter("all"), Some(None));
        assert_eq!(parse_day_filter("Tuesday"), Some(Some(DayOfWeek::Tuesday)));
        assert_eq!(parse_day_filter("someday"), None);
    }

    #[test]
    fn test_derive_calendar_fields() {
        // 2017-01-01 was a Sunday
        let ts = parse_timestamp("2017-01-01 00:07:57").unwrap();
        let fields = CalendarFields::derive(&ts).unwrap();
        assert_eq!(fields.month, Month::January);
        assert_eq!(fields.weekday, DayOfWeek::Sunday);
        assert_eq!(fields.hour, 0);

        let july = parse_timestamp("2017-07-01 10:00:00").unwrap();
        assert_eq!(CalendarFields::derive(&july), None);
    }
}
