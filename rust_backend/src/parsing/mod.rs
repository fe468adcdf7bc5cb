//! Parsers for bikeshare trip data files.
//!
//! City datasets are CSV files with one trip per row. Parsing happens in two
//! steps: the file is read into a Polars DataFrame with normalised column
//! types, then each row is converted into a [`TripRecord`](crate::core::TripRecord).
//!
//! # Example
//!
//! ```no_run
//! use bikeshare_rust::parsing::csv_parser::{dataframe_to_records, parse_trips_csv};
//! use std::path::Path;
//!
//! let df = parse_trips_csv(Path::new("chicago.csv")).expect("Failed to parse trips");
//! let parsed = dataframe_to_records(&df).expect("Malformed trip row");
//! println!("{} trips", parsed.records.len());
//! ```

pub mod csv_parser;


pub use csv_parser::{dataframe_to_records, parse_trips_csv, parse_trips_csv_reader, ParsedTrips};
