//! Fixed-size pages of raw trips for on-demand disclosure.
//!
//! [`pages`] is a pure producer: it hands back an iterator and the caller
//! decides, page by page, whether to pull the next one. Calling it again
//! starts from the first page.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

use crate::core::domain::TripRecord;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::parsing::csv_parser::{
    BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION,
    USER_TYPE,
};
use crate::transformations::filtering::FilteredView;

/// Separator placed between start and end station names in a route
pub const ROUTE_SEPARATOR: &str = " -- ";

/// A column that can be projected out of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TripColumn {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
    Month,
    DayOfWeek,
    Hour,
    Route,
}

impl TripColumn {
    pub const ALL: [TripColumn; 12] = [
        TripColumn::StartTime,
        TripColumn::EndTime,
        TripColumn::TripDuration,
        TripColumn::StartStation,
        TripColumn::EndStation,
        TripColumn::UserType,
        TripColumn::Gender,
        TripColumn::BirthYear,
        TripColumn::Month,
        TripColumn::DayOfWeek,
        TripColumn::Hour,
        TripColumn::Route,
    ];

    /// Column header: the CSV name for source fields, lower-case names for
    /// derived ones.
    pub fn name(self) -> &'static str {
        match self {
            TripColumn::StartTime => START_TIME,
            TripColumn::EndTime => END_TIME,
            TripColumn::TripDuration => TRIP_DURATION,
            TripColumn::StartStation => START_STATION,
            TripColumn::EndStation => END_STATION,
            TripColumn::UserType => USER_TYPE,
            TripColumn::Gender => GENDER,
            TripColumn::BirthYear => BIRTH_YEAR,
            TripColumn::Month => "month",
            TripColumn::DayOfWeek => "day_of_week",
            TripColumn::Hour => "hour",
            TripColumn::Route => "Start to End Stations",
        }
    }

    /// Case-insensitive lookup by header name
    pub fn from_name(name: &str) -> Option<TripColumn> {
        let name = name.trim();
        TripColumn::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Resolve a list of header names.
    ///
    /// # Errors
    /// * `BikeshareError::UnknownColumn` naming the first unrecognised header
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> BikeshareResult<Vec<TripColumn>> {
        names
            .iter()
            .map(|name| {
                TripColumn::from_name(name.as_ref())
                    .ok_or_else(|| BikeshareError::UnknownColumn(name.as_ref().to_string()))
            })
            .collect()
    }

    /// Project this column out of a trip
    pub fn project(self, record: &TripRecord) -> FieldValue<'_> {
        match self {
            TripColumn::StartTime => FieldValue::Timestamp(record.start_time()),
            TripColumn::EndTime => FieldValue::Timestamp(record.end_time()),
            TripColumn::TripDuration => record.trip_duration().into(),
            TripColumn::StartStation => record.start_station().into(),
            TripColumn::EndStation => record.end_station().into(),
            TripColumn::UserType => record.user_type().into(),
            TripColumn::Gender => record.gender().into(),
            TripColumn::BirthYear => record
                .birth_year()
                .map_or(FieldValue::Missing, |y| FieldValue::Integer(i64::from(y))),
            TripColumn::Month => FieldValue::Integer(i64::from(record.month().number())),
            TripColumn::DayOfWeek => FieldValue::Text(Cow::Borrowed(record.weekday().name())),
            TripColumn::Hour => FieldValue::Integer(i64::from(record.hour())),
            TripColumn::Route => match (record.start_station(), record.end_station()) {
                (Some(start), Some(end)) => {
                    FieldValue::Text(Cow::Owned(format!("{}{}{}", start, ROUTE_SEPARATOR, end)))
                }
                _ => FieldValue::Missing,
            },
        }
    }
}

impl fmt::Display for TripColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One projected cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    Timestamp(NaiveDateTime),
    Number(f64),
    Integer(i64),
    Text(Cow<'a, str>),
    Missing,
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Missing, |s| FieldValue::Text(Cow::Borrowed(s)))
    }
}

impl From<Option<f64>> for FieldValue<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Number)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Missing => f.write_str("NaN"),
        }
    }
}

/// One page of projected trips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    /// 1-based page number
    pub number: usize,
    /// Position of the first row within the view
    pub offset: usize,
    pub columns: Vec<TripColumn>,
    pub rows: Vec<Vec<FieldValue<'a>>>,
}

impl Page<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lazy sequence of pages over a view
#[derive(Debug, Clone)]
pub struct Pages<'v, 's> {
    view: &'v FilteredView<'s>,
    columns: Vec<TripColumn>,
    page_size: usize,
    next_offset: usize,
    next_number: usize,
}

impl<'v, 's> Pages<'v, 's> {
    pub fn columns(&self) -> &[TripColumn] {
        &self.columns
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl<'v, 's> Iterator for Pages<'v, 's> {
    type Item = Page<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.view.len();
        if self.next_offset >= total {
            return None;
        }

        let end = (self.next_offset + self.page_size).min(total);
        let rows = self
            .view
            .slice(self.next_offset..end)
            .map(|record| self.columns.iter().map(|c| c.project(record)).collect())
            .collect();

        let page = Page {
            number: self.next_number,
            offset: self.next_offset,
            columns: self.columns.clone(),
            rows,
        };
        self.next_offset = end;
        self.next_number += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_rows = self.view.len().saturating_sub(self.next_offset);
        let remaining = remaining_rows.div_ceil(self.page_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pages<'_, '_> {}

/// Split a view into pages of at most `page_size` trips projected to
/// `columns`. Repeated columns are kept once, at their first position.
///
/// # Errors
/// * `BikeshareError::InvalidPageSize` when `page_size` is zero
pub fn pages<'v, 's>(
    view: &'v FilteredView<'s>,
    columns: &[TripColumn],
    page_size: usize,
) -> BikeshareResult<Pages<'v, 's>> {
    if page_size == 0 {
        return Err(BikeshareError::InvalidPageSize);
    }

    let mut unique = Vec::with_capacity(columns.len());
    for column in columns {
        if !unique.contains(column) {
            unique.push(*column);
        }
    }

    Ok(Pages {
        view,
        columns: unique,
        page_size,
        next_offset: 0,
        next_number: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::City;
    use crate::core::store::RecordStore;
    use crate::time::parse_timestamp;

    fn store_of(n: usize) -> RecordStore {
        let records = (0..n)
            .map(|i| {
                let start = parse_timestamp(&format!("2017-04-{:02} 08:00:00", i % 28 + 1)).unwrap();
                TripRecord::new(start, start)
                    .unwrap()
                    .with_trip_duration(Some(i as f64))
                    .with_stations(Some(format!("S{}", i)), Some("Depot".to_string()))
            })
            .collect();
        RecordStore::from_records(City::Chicago, records, true, true)
    }

    #[test]
    fn test_page_sizes() {
        let store = store_of(12);
        let view = FilteredView::all(&store);
        let sizes: Vec<usize> = pages(&view, &[TripColumn::TripDuration], 5)
            .unwrap()
            .map(|p| p.len())
            .collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[test]
    fn test_empty_view_has_no_pages() {
        let store = store_of(0);
        let view = FilteredView::all(&store);
        let mut iter = pages(&view, &[TripColumn::StartTime], 5).unwrap();
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let store = store_of(3);
        let view = FilteredView::all(&store);
        assert!(matches!(
            pages(&view, &[TripColumn::StartTime], 0),
            Err(BikeshareError::InvalidPageSize)
        ));
    }

    #[test]
    fn test_pages_follow_view_order_and_numbering() {
        let store = store_of(7);
        let view = FilteredView::all(&store);
        let all: Vec<Page<'_>> = pages(&view, &[TripColumn::StartStation], 3)
            .unwrap()
            .collect();

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].number, 1);
        assert_eq!(all[2].number, 3);
        assert_eq!(all[1].offset, 3);
        assert_eq!(all[1].rows[0][0].to_string(), "S3");
        assert_eq!(all[2].rows[0][0].to_string(), "S6");
    }

    #[test]
    fn test_each_call_restarts() {
        let store = store_of(4);
        let view = FilteredView::all(&store);
        let first_run: Vec<usize> = pages(&view, &[TripColumn::Hour], 3)
            .unwrap()
            .map(|p| p.offset)
            .collect();
        let second_run: Vec<usize> = pages(&view, &[TripColumn::Hour], 3)
            .unwrap()
            .map(|p| p.offset)
            .collect();
        assert_eq!(first_run, vec![0, 3]);
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn test_projection_and_dedup() {
        let store = store_of(1);
        let view = FilteredView::all(&store);
        let page = pages(
            &view,
            &[TripColumn::Route, TripColumn::Hour, TripColumn::Route, TripColumn::Gender],
            5,
        )
        .unwrap()
        .next()
        .unwrap();

        assert_eq!(
            page.columns,
            vec![TripColumn::Route, TripColumn::Hour, TripColumn::Gender]
        );
        assert_eq!(page.rows[0][0].to_string(), "S0 -- Depot");
        assert_eq!(page.rows[0][1], FieldValue::Integer(8));
        assert_eq!(page.rows[0][2], FieldValue::Missing);
    }

    #[test]
    fn test_column_names() {
        assert_eq!(TripColumn::from_name("start time"), Some(TripColumn::StartTime));
        assert_eq!(TripColumn::from_name("HOUR"), Some(TripColumn::Hour));
        assert_eq!(TripColumn::from_name("nope"), None);

        let parsed = TripColumn::parse_list(&["User Type", "Birth Year"]).unwrap();
        assert_eq!(parsed, vec![TripColumn::UserType, TripColumn::BirthYear]);
        assert!(matches!(
            TripColumn::parse_list(&["Colour"]),
            Err(BikeshareError::UnknownColumn(_))
        ));
    }
}
