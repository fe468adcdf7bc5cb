use polars::prelude::*;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::core::domain::TripRecord;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::time::parse_timestamp;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city's file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// Trips converted from a DataFrame, plus which optional columns were present.
#[derive(Debug)]
pub struct ParsedTrips {
    pub records: Vec<TripRecord>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Parse a trip CSV file into a Polars DataFrame with normalised column types
pub fn parse_trips_csv(csv_path: &Path) -> BikeshareResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()?;

    normalize_column_types(df)
}

/// Parse trip CSV content from any reader
pub fn parse_trips_csv_reader<R: Read>(mut reader: R) -> BikeshareResult<DataFrame> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(buffer))
        .finish()?;

    normalize_column_types(df)
}

/// Cast columns to the types the record conversion expects.
///
/// Timestamps and text are kept as strings (timestamps are parsed with chrono
/// later so a bad row can be reported by number); numeric columns may be
/// inferred as integers when no decimal point appears, so they are widened.
fn normalize_column_types(df: DataFrame) -> BikeshareResult<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut lazy_df = df.lazy();

    for col_name in [START_TIME, END_TIME, START_STATION, END_STATION, USER_TYPE, GENDER] {
        if column_names.iter().any(|c| c == col_name) {
            lazy_df = lazy_df.with_column(col(col_name).cast(DataType::String));
        }
    }

    // The non-strict cast turns unparseable cells into nulls, so the text is
    // kept alongside to tell a blank cell from a malformed one.
    for col_name in [TRIP_DURATION, BIRTH_YEAR] {
        if column_names.iter().any(|c| c == col_name) {
            lazy_df = lazy_df.with_columns([
                col(col_name).cast(DataType::Float64),
                col(col_name)
                    .cast(DataType::String)
                    .alias(raw_column_name(col_name)),
            ]);
        }
    }

    Ok(lazy_df.collect()?)
}

/// Convert a trip DataFrame into `TripRecord`s, in row order.
///
/// The first malformed row aborts the conversion; no partial result is
/// returned. Row numbers in errors are 1-based data rows (header excluded).
pub fn dataframe_to_records(df: &DataFrame) -> BikeshareResult<ParsedTrips> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let has_column = |name: &str| column_names.iter().any(|c| c == name);

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|name| !has_column(name)) {
        return Err(BikeshareError::MissingColumn(missing.to_string()));
    }
    let has_gender = has_column(GENDER);
    let has_birth_year = has_column(BIRTH_YEAR);

    let starts = df.column(START_TIME)?.str()?;
    let ends = df.column(END_TIME)?.str()?;
    let durations = df.column(TRIP_DURATION)?.f64()?;
    let start_stations = df.column(START_STATION)?.str()?;
    let end_stations = df.column(END_STATION)?.str()?;
    let user_types = df.column(USER_TYPE)?.str()?;
    let genders = if has_gender {
        Some(df.column(GENDER)?.str()?)
    } else {
        None
    };
    let birth_years = if has_birth_year {
        Some(df.column(BIRTH_YEAR)?.f64()?)
    } else {
        None
    };
    let raw_durations = raw_column(df, TRIP_DURATION)?;
    let raw_birth_years = raw_column(df, BIRTH_YEAR)?;

    let height = df.height();
    let mut records = Vec::with_capacity(height);

    for i in 0..height {
        let row = i + 1;

        let start_time = starts
            .get(i)
            .and_then(parse_timestamp)
            .ok_or_else(|| BikeshareError::malformed(row, "Start Time is missing or not a timestamp"))?;
        let end_time = ends
            .get(i)
            .and_then(parse_timestamp)
            .ok_or_else(|| BikeshareError::malformed(row, "End Time is missing or not a timestamp"))?;

        let trip_duration = durations.get(i).filter(|d| !d.is_nan());
        ensure_numeric(trip_duration, raw_durations, i, row, TRIP_DURATION)?;
        if let Some(duration) = trip_duration {
            if duration < 0.0 {
                return Err(BikeshareError::malformed(
                    row,
                    format!("Trip Duration {} is negative", duration),
                ));
            }
        }

        let birth_year = birth_years
            .and_then(|col| col.get(i))
            .filter(|year| year.is_finite());
        ensure_numeric(birth_year, raw_birth_years, i, row, BIRTH_YEAR)?;

        let record = TripRecord::new(start_time, end_time)
            .map_err(|err| match err {
                BikeshareError::MalformedRecord { reason, .. } => {
                    BikeshareError::MalformedRecord { row, reason }
                }
                other => other,
            })?
            .with_trip_duration(trip_duration)
            .with_stations(text_at(start_stations, i), text_at(end_stations, i))
            .with_user_type(text_at(user_types, i))
            .with_gender(genders.and_then(|col| text_at(col, i)))
            .with_birth_year(birth_year.map(|year| year.floor() as i32));

        records.push(record);
    }

    Ok(ParsedTrips {
        records,
        has_gender,
        has_birth_year,
    })
}

/// Trimmed cell text; blank cells count as missing.
fn text_at(column: &StringChunked, index: usize) -> Option<String> {
    column
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn raw_column_name(name: &str) -> String {
    format!("{} (raw)", name)
}

/// Original text of a numeric column, when the frame went through
/// [`normalize_column_types`].
fn raw_column<'a>(df: &'a DataFrame, name: &str) -> BikeshareResult<Option<&'a StringChunked>> {
    let raw_name = raw_column_name(name);
    if !df.get_column_names().iter().any(|c| c.as_str() == raw_name) {
        return Ok(None);
    }
    Ok(Some(df.column(&raw_name)?.str()?))
}

/// A numeric cell that is missing after the cast must also be blank in the
/// source text; anything else is malformed.
fn ensure_numeric(
    parsed: Option<f64>,
    raw: Option<&StringChunked>,
    index: usize,
    row: usize,
    name: &str,
) -> BikeshareResult<()> {
    if parsed.is_some() {
        return Ok(());
    }
    match raw.and_then(|column| text_at(column, index)) {
        Some(text) => Err(BikeshareError::malformed(
            row,
            format!("{} '{}' is not a number", name, text),
        )),
        None => Ok(()),
    }
}
