//! High-level data loading utilities.
//!
//! Loaders resolve a city identifier to its CSV file, parse it and hand back a
//! ready-to-filter [`RecordStore`](crate::core::RecordStore).
//!
//! # Example
//!
//! ```no_run
//! use bikeshare_rust::io::loaders::DataSourceRegistry;
//!
//! let store = DataSourceRegistry::new("data")
//!     .load("Chicago")
//!     .expect("Failed to load");
//! println!("Loaded {} trips", store.count());
//! ```

pub mod loaders;


pub use loaders::{load, DataSourceRegistry};
