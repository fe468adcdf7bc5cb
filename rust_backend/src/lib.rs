//! Bikeshare explorer: load city trip datasets, filter them by month and
//! weekday, and summarise the result.
//!
//! The pipeline is `io::loaders` (CSV to [`core::RecordStore`]), then
//! `transformations::filtering` (store to view), then `services` (view to
//! statistics) and `transformations::pagination` (view to raw-data pages).
//! `report` and `session` sit on top for console use.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod report;
pub mod services;
pub mod session;
pub mod time;
pub mod transformations;
