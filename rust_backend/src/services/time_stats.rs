use log::debug;
use serde::Serialize;
use std::time::Instant;

use crate::algorithms::frequency::{first_max_index, ModeCount};
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::time::{DayOfWeek, Month};
use crate::transformations::filtering::FilteredView;

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub trips: usize,
    pub popular_month: ModeCount<Month>,
    pub popular_weekday: ModeCount<DayOfWeek>,
    pub popular_hour: ModeCount<u32>,
}

/// Compute the most common month, weekday and start hour.
///
/// Ties go to the earliest month, the earliest weekday in Monday..Sunday
/// order, and the smallest hour.
///
/// # Errors
/// * `BikeshareError::EmptyDataset` when the view holds no trips
pub fn compute_time_stats(view: &FilteredView<'_>) -> BikeshareResult<TimeStats> {
    if view.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let started = Instant::now();

    let mut months = [0usize; 6];
    let mut weekdays = [0usize; 7];
    let mut hours = [0usize; 24];
    for record in view.iter() {
        months[record.month().index()] += 1;
        weekdays[record.weekday().index()] += 1;
        hours[record.hour() as usize] += 1;
    }

    let month = first_max_index(&months).ok_or(BikeshareError::EmptyDataset)?;
    let weekday = first_max_index(&weekdays).ok_or(BikeshareError::EmptyDataset)?;
    let hour = first_max_index(&hours).ok_or(BikeshareError::EmptyDataset)?;

    let stats = TimeStats {
        trips: view.len(),
        popular_month: ModeCount::new(Month::ALL[month], months[month]),
        popular_weekday: ModeCount::new(DayOfWeek::ALL[weekday], weekdays[weekday]),
        popular_hour: ModeCount::new(hour as u32, hours[hour]),
    };

    debug!(
        "Time statistics over {} trips took {:?}",
        stats.trips,
        started.elapsed()
    );
    Ok(stats)
}
