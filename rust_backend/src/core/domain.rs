//! Domain models for bikeshare trips and the cities that publish them.
//!
//! A [`TripRecord`] is immutable once built: the calendar fields used for
//! filtering are derived from `start_time` at construction and there is no way
//! to change `start_time` afterwards, so they can never drift out of sync.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::core::error::{BikeshareError, BikeshareResult};
use crate::time::{CalendarFields, DayOfWeek, Month};

/// One of the three cities with a published trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Resolve a user-supplied source identifier.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace, so
    /// `"New York City"` and `" new york city"` both resolve.
    ///
    /// # Errors
    /// * `BikeshareError::DataSourceNotFound` for anything else
    pub fn from_source_id(source_id: &str) -> BikeshareResult<City> {
        let normalized = source_id.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.source_id() == normalized)
            .ok_or_else(|| BikeshareError::DataSourceNotFound(source_id.trim().to_string()))
    }

    /// Normalised identifier, e.g. `"new york city"`.
    pub fn source_id(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Default CSV file name for this city.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Washington does not publish gender or birth year.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

/// A single bikeshare trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    trip_duration: Option<f64>,
    start_station: Option<String>,
    end_station: Option<String>,
    user_type: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,
    calendar: CalendarFields,
}

impl TripRecord {
    /// Creates a trip from its required timestamps.
    ///
    /// # Errors
    /// * `BikeshareError::MalformedRecord` (row 0) when `start_time` falls
    ///   outside January..June; loaders rewrite the row number.
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> BikeshareResult<Self> {
        let calendar = CalendarFields::derive(&start_time).ok_or_else(|| {
            BikeshareError::malformed(
                0,
                format!("Start Time {} is outside January to June", start_time),
            )
        })?;
        Ok(Self {
            start_time,
            end_time,
            trip_duration: None,
            start_station: None,
            end_station: None,
            user_type: None,
            gender: None,
            birth_year: None,
            calendar,
        })
    }

    pub fn with_trip_duration(mut self, seconds: Option<f64>) -> Self {
        self.trip_duration = seconds;
        self
    }

    pub fn with_stations(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start_station = start;
        self.end_station = end;
        self
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn trip_duration(&self) -> Option<f64> {
        self.trip_duration
    }

    pub fn start_station(&self) -> Option<&str> {
        self.start_station.as_deref()
    }

    pub fn end_station(&self) -> Option<&str> {
        self.end_station.as_deref()
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    pub fn month(&self) -> Month {
        self.calendar.month
    }

    pub fn weekday(&self) -> DayOfWeek {
        self.calendar.weekday
    }

    pub fn hour(&self) -> u32 {
        self.calendar.hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;
    use chrono::{Datelike, Timelike};

    fn ts(text: &str) -> NaiveDateTime {
        parse_timestamp(text).unwrap()
    }

    #[test]
    fn city_lookup_is_case_insensitive() {
        assert_eq!(City::from_source_id("Chicago").unwrap(), City::Chicago);
        assert_eq!(
            City::from_source_id("  NEW YORK CITY ").unwrap(),
            City::NewYorkCity
        );
        assert_eq!(City::from_source_id("washington").unwrap(), City::Washington);
    }

    #[test]
    fn unknown_city_is_not_found() {
        match City::from_source_id("atlantis") {
            Err(BikeshareError::DataSourceNotFound(id)) => assert_eq!(id, "atlantis"),
            other => panic!("expected DataSourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn city_files_and_demographics() {
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert!(City::Chicago.has_demographics());
        assert!(!City::Washington.has_demographics());
        assert_eq!(City::NewYorkCity.to_string(), "New York City");
    }

    #[test]
    fn derived_fields_follow_start_time() {
        let start = ts("2017-03-15 17:42:00");
        let record = TripRecord::new(start, ts("2017-03-15 18:00:00"))
            .unwrap()
            .with_trip_duration(Some(1080.0));

        assert_eq!(record.month().number(), start.month());
        assert_eq!(record.weekday(), DayOfWeek::from(start.weekday()));
        assert_eq!(record.hour(), start.hour());
        assert_eq!(record.trip_duration(), Some(1080.0));
    }

    #[test]
    fn start_outside_coverage_is_malformed() {
        let result = TripRecord::new(ts("2017-08-01 09:00:00"), ts("2017-08-01 09:10:00"));
        assert!(matches!(
            result,
            Err(BikeshareError::MalformedRecord { .. })
        ));
    }
}
