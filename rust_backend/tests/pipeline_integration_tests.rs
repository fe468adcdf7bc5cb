//! Integration tests for the load, filter, summarise and paginate pipeline.
//!
//! These tests run against the small city datasets in `tests/fixtures/`.

use std::path::PathBuf;

use proptest::prelude::*;

use bikeshare_rust::core::{BikeshareError, City, RecordStore};
use bikeshare_rust::io::DataSourceRegistry;
use bikeshare_rust::services::{compute_user_stats, format_duration, StatisticsReport};
use bikeshare_rust::time::{DayOfWeek, Month};
use bikeshare_rust::transformations::{filter, pages, FilteredView, TripColumn, TripFilter};

fn fixtures() -> DataSourceRegistry {
    DataSourceRegistry::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn load(city: &str) -> RecordStore {
    fixtures().load(city).unwrap()
}

#[test]
fn test_chicago_full_report() {
    let store = load("chicago");
    assert_eq!(store.city(), City::Chicago);
    assert_eq!(store.count(), 12);

    let report = StatisticsReport::compute(&FilteredView::all(&store)).unwrap();
    assert_eq!(report.trips, 12);

    let time = report.time.unwrap();
    assert_eq!(time.popular_month.value, Month::June);
    assert_eq!(time.popular_month.count, 5);
    assert_eq!(time.popular_weekday.value, DayOfWeek::Tuesday);
    assert_eq!(time.popular_weekday.count, 6);
    assert_eq!(time.popular_hour.value, 8);

    let stations = report.stations.unwrap();
    assert_eq!(
        stations.popular_start_station.unwrap().value,
        "Canal St & Adams St"
    );
    assert_eq!(
        stations.popular_end_station.unwrap().value,
        "Clinton St & Madison St"
    );
    assert_eq!(
        stations.popular_route.unwrap().value,
        "Canal St & Adams St -- Clinton St & Madison St"
    );

    let durations = report.durations.unwrap();
    assert_eq!(durations.trips_counted, 11);
    assert_eq!(durations.trips_missing, 1);
    assert_eq!(durations.total_seconds, 12021.0);
    assert_eq!(durations.total_hms, "03:20:21");
    assert_eq!(durations.mean_hms, "00:18:12");

    let users = report.users.unwrap();
    assert_eq!(
        users.user_types.counts,
        vec![
            ("Subscriber".to_string(), 8),
            ("Customer".to_string(), 3),
            ("Dependent".to_string(), 1),
        ]
    );
    let genders = users.genders.unwrap();
    assert_eq!(
        genders.counts,
        vec![("Male".to_string(), 8), ("Female".to_string(), 4)]
    );
    assert_eq!(genders.imputed, 3);

    let years = users.birth_years.unwrap();
    assert_eq!(years.earliest, 1962);
    assert_eq!(years.most_recent, 2001);
    assert_eq!(years.most_common.value, 1984);
    assert_eq!(years.imputed, 3);
}

#[test]
fn test_filter_by_month_and_day() {
    let store = load("Chicago");

    let june = filter(&store, Some(Month::June), None);
    assert_eq!(june.len(), 5);

    let june_tuesdays = filter(&store, Some(Month::June), Some(DayOfWeek::Tuesday));
    assert_eq!(june_tuesdays.len(), 3);
    assert!(june_tuesdays
        .iter()
        .all(|trip| trip.month() == Month::June && trip.weekday() == DayOfWeek::Tuesday));

    // Load order survives filtering
    let starts: Vec<_> = june_tuesdays.iter().map(|t| t.start_time()).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);

    let sundays = filter(&store, None, Some(DayOfWeek::Sunday));
    assert!(sundays.is_empty());
    let report = StatisticsReport::compute(&sundays).unwrap();
    assert!(report.time.is_none());
}

#[test]
fn test_washington_has_no_demographics() {
    let store = load("WASHINGTON");
    assert!(!store.has_gender());
    assert!(!store.has_birth_year());

    let report = StatisticsReport::compute(&FilteredView::all(&store)).unwrap();
    let users = report.users.unwrap();
    assert!(users.genders.is_none());
    assert!(users.birth_years.is_none());

    // Surrounding whitespace in station names is not significant
    let stations = report.stations.unwrap();
    assert_eq!(
        stations.popular_start_station.unwrap().value,
        "Columbus Circle / Union Station"
    );
}

#[test]
fn test_new_york_city_by_display_name() {
    let store = load("New York City");
    assert_eq!(store.city(), City::NewYorkCity);
    assert_eq!(store.count(), 7);

    let users = compute_user_stats(&FilteredView::all(&store)).unwrap();
    assert_eq!(users.user_types.imputed, 1);
    assert_eq!(users.user_types.imputed_with.as_deref(), Some("Subscriber"));
}

#[test]
fn test_unknown_source() {
    let result = fixtures().load("atlantis");
    assert!(matches!(result, Err(BikeshareError::DataSourceNotFound(_))));
}

#[test]
fn test_imputation_is_repeatable() {
    let store = load("chicago");
    let view = FilteredView::all(&store);

    let first = compute_user_stats(&view).unwrap();
    let second = compute_user_stats(&view).unwrap();
    assert_eq!(first, second);

    // The store still holds the original blanks
    assert_eq!(store.iter().filter(|t| t.gender().is_none()).count(), 3);
}

#[test]
fn test_paginate_chicago() {
    let store = load("chicago");
    let view = FilteredView::all(&store);
    let columns = [TripColumn::StartStation, TripColumn::EndStation];

    let sizes: Vec<usize> = pages(&view, &columns, 5).unwrap().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![5, 5, 2]);

    let first = pages(&view, &columns, 5).unwrap().next().unwrap();
    assert_eq!(first.rows[0][0].to_string(), "Canal St & Adams St");

    assert!(matches!(
        pages(&view, &columns, 0),
        Err(BikeshareError::InvalidPageSize)
    ));
}

fn month_strategy() -> impl Strategy<Value = Option<Month>> {
    prop::option::of((0..Month::ALL.len()).prop_map(|i| Month::ALL[i]))
}

fn day_strategy() -> impl Strategy<Value = Option<DayOfWeek>> {
    prop::option::of((0..DayOfWeek::ALL.len()).prop_map(|i| DayOfWeek::ALL[i]))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_format_duration_round_trips_whole_seconds(seconds in 0.0f64..10_000_000.0) {
        let text = format_duration(seconds);
        let parts: Vec<u64> = text.split(':').map(|p| p.parse().unwrap()).collect();

        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[1] < 60 && parts[2] < 60);
        prop_assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], seconds.floor() as u64);
    }

    #[test]
    fn prop_filter_is_idempotent(month in month_strategy(), day in day_strategy()) {
        let store = load("chicago");
        let criteria = TripFilter::new(month, day);

        let once = criteria.apply(&store);
        let twice = once.refine(&criteria);
        prop_assert_eq!(once.indices(), twice.indices());

        let expected = store.iter().filter(|t| criteria.matches(t)).count();
        prop_assert_eq!(once.len(), expected);
    }

    #[test]
    fn prop_pages_cover_view(page_size in 1usize..16, month in month_strategy()) {
        let store = load("chicago");
        let view = filter(&store, month, None);
        let sizes: Vec<usize> = pages(&view, &[TripColumn::StartTime], page_size)
            .unwrap()
            .map(|p| p.len())
            .collect();

        prop_assert_eq!(sizes.iter().sum::<usize>(), view.len());
        prop_assert_eq!(sizes.len(), view.len().div_ceil(page_size));
        if let Some((last, full)) = sizes.split_last() {
            prop_assert!(full.iter().all(|&n| n == page_size));
            prop_assert!(*last >= 1 && *last <= page_size);
        }
    }
}
