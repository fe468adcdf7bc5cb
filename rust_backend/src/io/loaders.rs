use log::{debug, info};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::domain::City;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::core::store::RecordStore;
use crate::parsing::csv_parser;

/// Maps city identifiers to the CSV files that hold their trips
#[derive(Debug, Clone)]
pub struct DataSourceRegistry {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl Default for DataSourceRegistry {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DataSourceRegistry {
    /// Registry resolving every city to `<data_dir>/<city file name>`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Point one city at a specific file. Relative paths are resolved
    /// against the data directory.
    pub fn with_file(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(city, path.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the CSV file backing a city
    pub fn path_for(&self, city: City) -> PathBuf {
        match self.overrides.get(&city) {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.data_dir.join(path),
            None => self.data_dir.join(city.file_name()),
        }
    }

    /// Resolve a source identifier to its city and file
    pub fn resolve(&self, source_id: &str) -> BikeshareResult<(City, PathBuf)> {
        let city = City::from_source_id(source_id)?;
        Ok((city, self.path_for(city)))
    }

    /// Load every trip for the named source.
    ///
    /// # Errors
    /// * `DataSourceNotFound` if `source_id` is not a known city
    /// * `SourceUnavailable` if the city's file does not exist
    /// * `MissingColumn` / `MalformedRecord` if the file cannot be converted;
    ///   the load is aborted and nothing is returned
    pub fn load(&self, source_id: &str) -> BikeshareResult<RecordStore> {
        let (city, path) = self.resolve(source_id)?;
        if !path.is_file() {
            return Err(BikeshareError::SourceUnavailable {
                city: city.to_string(),
                path,
            });
        }

        debug!("Loading trips for {} from {}", city, path.display());
        let df = csv_parser::parse_trips_csv(&path)?;
        let store = store_from_dataframe(city, &df)?;

        info!(
            "Loaded {} trips for {} from {}",
            store.count(),
            city,
            path.display()
        );
        Ok(store)
    }
}

/// Load a source using the default registry (city files in the working directory)
pub fn load(source_id: &str) -> BikeshareResult<RecordStore> {
    DataSourceRegistry::default().load(source_id)
}

impl RecordStore {
    /// Build a store from CSV content that is already in hand.
    pub fn from_csv_reader<R: Read>(city: City, reader: R) -> BikeshareResult<RecordStore> {
        let df = csv_parser::parse_trips_csv_reader(reader)?;
        store_from_dataframe(city, &df)
    }
}

fn store_from_dataframe(city: City, df: &polars::prelude::DataFrame) -> BikeshareResult<RecordStore> {
    let parsed = csv_parser::dataframe_to_records(df)?;
    Ok(RecordStore::from_records(
        city,
        parsed.records,
        parsed.has_gender,
        parsed.has_birth_year,
    ))
}
