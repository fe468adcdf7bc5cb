use serde::Serialize;

use crate::core::domain::TripRecord;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::core::store::RecordStore;
use crate::time::{parse_day_filter, parse_month_filter, DayOfWeek, Month};

/// Month and weekday criteria; `None` means "no filter" for that field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripFilter {
    pub month: Option<Month>,
    pub weekday: Option<DayOfWeek>,
}

impl TripFilter {
    pub fn new(month: Option<Month>, weekday: Option<DayOfWeek>) -> Self {
        Self { month, weekday }
    }

    /// Build criteria from the filter vocabulary (`january`..`june`,
    /// `monday`..`sunday`, or `all`), case-insensitively.
    pub fn parse(month: &str, day: &str) -> BikeshareResult<Self> {
        let month = parse_month_filter(month).ok_or_else(|| {
            BikeshareError::InvalidFilter(format!(
                "'{}' is not a month from january to june",
                month.trim()
            ))
        })?;
        let weekday = parse_day_filter(day).ok_or_else(|| {
            BikeshareError::InvalidFilter(format!("'{}' is not a day of the week", day.trim()))
        })?;
        Ok(Self { month, weekday })
    }

    /// Whether a trip satisfies both criteria
    pub fn matches(&self, record: &TripRecord) -> bool {
        self.month.map_or(true, |m| record.month() == m)
            && self.weekday.map_or(true, |d| record.weekday() == d)
    }

    /// Apply the criteria to a store
    pub fn apply<'s>(&self, store: &'s RecordStore) -> FilteredView<'s> {
        let indices = store
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(index, _)| index)
            .collect();
        FilteredView {
            store,
            indices,
            criteria: *self,
        }
    }
}

/// Filter a store by optional month and weekday.
///
/// An empty result is a valid view, not an error. Surviving trips keep their
/// load order and the store is never modified.
pub fn filter(
    store: &RecordStore,
    month: Option<Month>,
    weekday: Option<DayOfWeek>,
) -> FilteredView<'_> {
    TripFilter::new(month, weekday).apply(store)
}

/// Ordered subset of a store's trips, held as row indices.
#[derive(Debug, Clone)]
pub struct FilteredView<'s> {
    store: &'s RecordStore,
    indices: Vec<usize>,
    criteria: TripFilter,
}

impl<'s> FilteredView<'s> {
    /// View over every trip in the store
    pub fn all(store: &'s RecordStore) -> Self {
        TripFilter::default().apply(store)
    }

    pub fn store(&self) -> &'s RecordStore {
        self.store
    }

    pub fn criteria(&self) -> TripFilter {
        self.criteria
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Store row indices of the surviving trips
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate surviving trips in load order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'s TripRecord> + '_ {
        let records = self.store.records();
        self.indices.iter().map(move |&index| &records[index])
    }

    /// Trips in `range` of this view (positions, not store indices)
    pub(crate) fn slice(
        &self,
        range: std::ops::Range<usize>,
    ) -> impl Iterator<Item = &'s TripRecord> + '_ {
        let records = self.store.records();
        self.indices[range].iter().map(move |&index| &records[index])
    }

    /// Narrow this view further. Criteria not set in `filter` keep this
    /// view's values.
    pub fn refine(&self, filter: &TripFilter) -> FilteredView<'s> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&index| filter.matches(&self.store.records()[index]))
            .collect();
        FilteredView {
            store: self.store,
            indices,
            criteria: TripFilter {
                month: filter.month.or(self.criteria.month),
                weekday: filter.weekday.or(self.criteria.weekday),
            },
        }
    }

    /// Whether the source carried a Gender column
    pub fn has_gender(&self) -> bool {
        self.store.has_gender()
    }

    /// Whether the source carried a Birth Year column
    pub fn has_birth_year(&self) -> bool {
        self.store.has_birth_year()
    }
}
