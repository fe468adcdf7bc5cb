//! View-local imputation of missing values.
//!
//! Imputation never touches the record store: each function takes the cells
//! of one column, borrowed from the view, and returns a fresh overlay holding
//! the filled values. The overlay lives only as long as the statistic that
//! asked for it.

use crate::algorithms::frequency::FrequencyTable;

/// One column after missing cells were filled
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedColumn<T> {
    /// Present values plus fills, in view order. When no fill value exists
    /// (every cell missing) this holds only the present values, i.e. nothing.
    pub values: Vec<T>,
    /// Value used for the missing cells, if any could be computed
    pub fill: Option<T>,
    /// How many missing cells were replaced by `fill`
    pub filled: usize,
}

/// Fill missing text cells with the most frequent present value
/// (first-encountered on ties).
pub fn impute_mode<'a, I>(cells: I) -> ImputedColumn<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let cells: Vec<Option<&'a str>> = cells.into_iter().collect();
    let table: FrequencyTable<&'a str> = cells.iter().flatten().copied().collect();
    let fill = table.mode().map(|m| *m.value);

    fill_missing(cells, fill)
}

/// Fill missing numeric cells with the arithmetic mean of present values.
pub fn impute_mean<I>(cells: I) -> ImputedColumn<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let cells: Vec<Option<f64>> = cells.into_iter().collect();
    let (sum, count) = cells
        .iter()
        .flatten()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    let fill = (count > 0).then(|| sum / count as f64);

    fill_missing(cells, fill)
}

fn fill_missing<T: Copy>(cells: Vec<Option<T>>, fill: Option<T>) -> ImputedColumn<T> {
    let mut filled = 0;
    let values = cells
        .into_iter()
        .filter_map(|cell| match (cell, fill) {
            (Some(value), _) => Some(value),
            (None, Some(fill)) => {
                filled += 1;
                Some(fill)
            }
            (None, None) => None,
        })
        .collect();

    ImputedColumn {
        values,
        fill,
        filled,
    }
}
