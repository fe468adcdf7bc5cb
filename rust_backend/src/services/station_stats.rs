use log::debug;
use serde::Serialize;
use std::time::Instant;

use crate::algorithms::frequency::{FrequencyTable, ModeCount};
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::transformations::filtering::FilteredView;
use crate::transformations::pagination::ROUTE_SEPARATOR;

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub trips: usize,
    pub popular_start_station: Option<ModeCount<String>>,
    pub popular_end_station: Option<ModeCount<String>>,
    /// Most frequent `start -- end` route
    pub popular_route: Option<ModeCount<String>>,
}

/// Compute the most used start station, end station and route.
///
/// Routes are counted on the joined `"start -- end"` text, and only for trips
/// with both stations present. Ties go to the value seen first in view order.
///
/// # Errors
/// * `BikeshareError::EmptyDataset` when the view holds no trips
pub fn compute_station_stats(view: &FilteredView<'_>) -> BikeshareResult<StationStats> {
    if view.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let started = Instant::now();

    let mut starts: FrequencyTable<&str> = FrequencyTable::new();
    let mut ends: FrequencyTable<&str> = FrequencyTable::new();
    let mut routes: FrequencyTable<String> = FrequencyTable::new();

    for record in view.iter() {
        if let Some(start) = record.start_station() {
            starts.observe(start);
        }
        if let Some(end) = record.end_station() {
            ends.observe(end);
        }
        if let (Some(start), Some(end)) = (record.start_station(), record.end_station()) {
            routes.observe(format!("{}{}{}", start, ROUTE_SEPARATOR, end));
        }
    }

    let stats = StationStats {
        trips: view.len(),
        popular_start_station: starts.mode().map(|m| m.map(|s| s.to_string())),
        popular_end_station: ends.mode().map(|m| m.map(|s| s.to_string())),
        popular_route: routes.mode().map(|m| m.map(String::clone)),
    };

    debug!(
        "Station statistics over {} trips ({} distinct routes) took {:?}",
        stats.trips,
        routes.len(),
        started.elapsed()
    );
    Ok(stats)
}
