//! Statistics over filtered trips.
//!
//! Each statistic group is a pure function from a
//! [`FilteredView`](crate::transformations::FilteredView) to a value object.
//! An empty view yields `BikeshareError::EmptyDataset` instead of a number, so
//! callers always branch on "no data" explicitly.

pub mod duration_stats;
pub mod report;
pub mod station_stats;
pub mod time_stats;
pub mod user_stats;

pub use duration_stats::{compute_duration_stats, format_duration, DurationStats};
pub use report::StatisticsReport;
pub use station_stats::{compute_station_stats, StationStats};
pub use time_stats::{compute_time_stats, TimeStats};
pub use user_stats::{compute_user_stats, BirthYearStats, CategoryBreakdown, UserStats};

use crate::transformations::pagination::TripColumn;

/// The four statistic groups, in the order a session presents them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    Time,
    Station,
    Duration,
    User,
}

impl StatGroup {
    pub const ALL: [StatGroup; 4] = [
        StatGroup::Time,
        StatGroup::Station,
        StatGroup::Duration,
        StatGroup::User,
    ];

    /// Heading shown while the group is computed
    pub fn title(self) -> &'static str {
        match self {
            StatGroup::Time => "The Most Frequent Times of Travel",
            StatGroup::Station => "The Most Popular Stations and Trip",
            StatGroup::Duration => "Trip Duration",
            StatGroup::User => "User Stats",
        }
    }

    /// Short label used when offering raw data, e.g. "raw station data"
    pub fn label(self) -> &'static str {
        match self {
            StatGroup::Time => "time",
            StatGroup::Station => "station",
            StatGroup::Duration => "trip duration",
            StatGroup::User => "user statistics",
        }
    }

    /// Columns disclosed when the user asks for this group's raw data
    pub fn raw_columns(self) -> &'static [TripColumn] {
        match self {
            StatGroup::Time => &[TripColumn::StartTime, TripColumn::EndTime, TripColumn::Hour],
            StatGroup::Station => &[TripColumn::StartStation, TripColumn::EndStation],
            StatGroup::Duration => &[TripColumn::TripDuration],
            StatGroup::User => &[TripColumn::UserType, TripColumn::BirthYear],
        }
    }
}
