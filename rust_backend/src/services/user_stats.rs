use log::debug;
use serde::Serialize;
use std::time::Instant;

use crate::algorithms::frequency::{FrequencyTable, ModeCount};
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::transformations::cleaning::{impute_mean, impute_mode, ImputedColumn};
use crate::transformations::filtering::FilteredView;

/// Counts per category after missing values were imputed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Value and count, by descending count (first-seen order on ties)
    pub counts: Vec<(String, usize)>,
    /// Value assigned to missing cells, if any could be chosen
    pub imputed_with: Option<String>,
    /// Number of cells that were missing and got `imputed_with`
    pub imputed: usize,
}

impl CategoryBreakdown {
    fn from_column(column: ImputedColumn<&str>) -> Self {
        let table: FrequencyTable<&str> = column.values.iter().copied().collect();
        Self {
            counts: table
                .into_distribution()
                .into_iter()
                .map(|(value, count)| (value.to_string(), count))
                .collect(),
            imputed_with: column.fill.map(str::to_string),
            imputed: column.filled,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Oldest, youngest and most common birth year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: ModeCount<i32>,
    /// Mean of the present birth years, used for missing ones
    pub imputed_with: Option<f64>,
    pub imputed: usize,
}

/// User demographics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub trips: usize,
    pub user_types: CategoryBreakdown,
    /// `None` when the city does not publish gender
    pub genders: Option<CategoryBreakdown>,
    /// `None` when the city does not publish birth years, or none are present
    pub birth_years: Option<BirthYearStats>,
}

/// Compute user type, gender and birth-year statistics.
///
/// Missing user types and genders are filled with the view's most frequent
/// value, missing birth years with the mean birth year. The fills live in
/// per-column overlays built here; the records themselves are untouched.
///
/// # Errors
/// * `BikeshareError::EmptyDataset` when the view holds no trips
pub fn compute_user_stats(view: &FilteredView<'_>) -> BikeshareResult<UserStats> {
    if view.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let started = Instant::now();

    let user_types =
        CategoryBreakdown::from_column(impute_mode(view.iter().map(|r| r.user_type())));

    let genders = view
        .has_gender()
        .then(|| CategoryBreakdown::from_column(impute_mode(view.iter().map(|r| r.gender()))));

    let birth_years = if view.has_birth_year() {
        birth_year_stats(impute_mean(
            view.iter().map(|r| r.birth_year().map(f64::from)),
        ))
    } else {
        None
    };

    debug!(
        "User statistics over {} trips took {:?} ({} user types imputed)",
        view.len(),
        started.elapsed(),
        user_types.imputed
    );

    Ok(UserStats {
        trips: view.len(),
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(column: ImputedColumn<f64>) -> Option<BirthYearStats> {
    let first = *column.values.first()?;
    let (min, max) = column
        .values
        .iter()
        .fold((first, first), |(lo, hi), &y| (lo.min(y), hi.max(y)));

    // f64 is not Hash; count on the bit pattern of each year
    let table: FrequencyTable<u64> = column.values.iter().map(|y| y.to_bits()).collect();
    let most_common = table
        .mode()?
        .map(|bits| f64::from_bits(*bits).floor() as i32);

    Some(BirthYearStats {
        earliest: min.floor() as i32,
        most_recent: max.floor() as i32,
        most_common,
        imputed_with: column.fill,
        imputed: column.filled,
    })
}
