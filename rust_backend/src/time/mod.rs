//! Calendar vocabulary and timestamp handling for trip records.
//!
//! Trip datasets only cover January through June, so months are modelled as a
//! closed six-value enum rather than a bare integer.

pub mod calendar;

pub use calendar::{
    parse_day_filter, parse_month_filter, parse_timestamp, CalendarFields, DayOfWeek, Month,
    ALL_SENTINEL,
};
