use log::debug;
use serde::Serialize;
use std::time::Instant;

use crate::core::error::{BikeshareError, BikeshareResult};
use crate::transformations::filtering::FilteredView;

/// Total and mean trip duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    /// Trips that carried a duration
    pub trips_counted: usize,
    /// Trips whose duration was blank; excluded from both total and mean
    pub trips_missing: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
    /// `total_seconds` as `HH:MM:SS`
    pub total_hms: String,
    /// `mean_seconds` as `HH:MM:SS`
    pub mean_hms: String,
}

/// Render seconds as zero-padded `HH:MM:SS`.
///
/// Fractional seconds are dropped and hours are not wrapped at 24, so
/// `90000.0` renders as `"25:00:00"`. Negative or non-finite input renders
/// as zero.
pub fn format_duration(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        whole / 3600,
        (whole % 3600) / 60,
        whole % 60
    )
}

/// Compute the total and mean duration over trips with a duration present.
///
/// # Errors
/// * `BikeshareError::EmptyDataset` when the view is empty or no trip in it
///   has a duration
pub fn compute_duration_stats(view: &FilteredView<'_>) -> BikeshareResult<DurationStats> {
    if view.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let started = Instant::now();

    let (total_seconds, trips_counted) = view
        .iter()
        .filter_map(|record| record.trip_duration())
        .fold((0.0_f64, 0_usize), |(sum, n), d| (sum + d, n + 1));

    if trips_counted == 0 {
        return Err(BikeshareError::EmptyDataset);
    }

    let trips_missing = view.len() - trips_counted;
    if trips_missing > 0 {
        debug!(
            "{} of {} trips have no duration and were left out",
            trips_missing,
            view.len()
        );
    }

    let mean_seconds = total_seconds / trips_counted as f64;
    debug!(
        "Duration statistics over {} trips took {:?}",
        view.len(),
        started.elapsed()
    );
    Ok(DurationStats {
        trips_counted,
        trips_missing,
        total_seconds,
        mean_seconds,
        total_hms: format_duration(total_seconds),
        mean_hms: format_duration(mean_seconds),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{City, TripRecord};
    use crate::core::store::RecordStore;
    use crate::time::parse_timestamp;

    fn store(durations: &[Option<f64>]) -> RecordStore {
        let start = parse_timestamp("2017-03-01 07:00:00").unwrap();
        let records = durations
            .iter()
            .map(|d| TripRecord::new(start, start).unwrap().with_trip_duration(*d))
            .collect();
        RecordStore::from_records(City::Chicago, records, true, true)
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.999), "00:00:59");
        assert_eq!(format_duration(90000.0), "25:00:00");
        assert_eq!(format_duration(-4.0), "00:00:00");
        assert_eq!(format_duration(f64::NAN), "00:00:00");
    }

    #[test]
    fn test_total_and_mean() {
        let store = store(&[Some(600.0), Some(1200.0), Some(1800.0)]);
        let stats = compute_duration_stats(&FilteredView::all(&store)).unwrap();
        assert_eq!(stats.total_seconds, 3600.0);
        assert_eq!(stats.mean_seconds, 1200.0);
        assert_eq!(stats.total_hms, "01:00:00");
        assert_eq!(stats.mean_hms, "00:20:00");
        assert_eq!(stats.trips_missing, 0);
    }

    #[test]
    fn test_missing_durations_are_excluded_from_mean() {
        let store = store(&[Some(100.0), None, Some(300.0), None]);
        let stats = compute_duration_stats(&FilteredView::all(&store)).unwrap();
        assert_eq!(stats.trips_counted, 2);
        assert_eq!(stats.trips_missing, 2);
        assert_eq!(stats.total_seconds, 400.0);
        assert_eq!(stats.mean_seconds, 200.0);
    }

    #[test]
    fn test_no_durations_is_empty() {
        let blank = store(&[None, None]);
        assert!(matches!(
            compute_duration_stats(&FilteredView::all(&blank)),
            Err(BikeshareError::EmptyDataset)
        ));

        let empty = store(&[]);
        assert!(matches!(
            compute_duration_stats(&FilteredView::all(&empty)),
            Err(BikeshareError::EmptyDataset)
        ));
    }
}
