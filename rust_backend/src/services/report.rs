use serde::Serialize;

use crate::core::domain::City;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::services::duration_stats::{compute_duration_stats, DurationStats};
use crate::services::station_stats::{compute_station_stats, StationStats};
use crate::services::time_stats::{compute_time_stats, TimeStats};
use crate::services::user_stats::{compute_user_stats, UserStats};
use crate::transformations::filtering::{FilteredView, TripFilter};

/// All four statistic groups for one filtered view.
///
/// A group is `None` when it had no data to summarise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub city: City,
    pub criteria: TripFilter,
    pub trips: usize,
    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub durations: Option<DurationStats>,
    pub users: Option<UserStats>,
}

impl StatisticsReport {
    pub fn compute(view: &FilteredView<'_>) -> BikeshareResult<Self> {
        Ok(Self {
            city: view.store().city(),
            criteria: view.criteria(),
            trips: view.len(),
            time: no_data_as_none(compute_time_stats(view))?,
            stations: no_data_as_none(compute_station_stats(view))?,
            durations: no_data_as_none(compute_duration_stats(view))?,
            users: no_data_as_none(compute_user_stats(view))?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.trips == 0
    }
}

fn no_data_as_none<T>(result: BikeshareResult<T>) -> BikeshareResult<Option<T>> {
    match result {
        Ok(stats) => Ok(Some(stats)),
        Err(BikeshareError::EmptyDataset) => Ok(None),
        Err(other) => Err(other),
    }
}
