//! Filtering, imputation and pagination over loaded trips.
//!
//! Nothing in this module mutates a [`RecordStore`](crate::core::RecordStore):
//! filters produce index-based views, imputation produces per-column overlays
//! and pagination projects borrowed records into pages.
//!
//! # Modules
//!
//! - [`filtering`]: month / weekday criteria and the resulting [`FilteredView`]
//! - [`cleaning`]: view-local mode and mean imputation
//! - [`pagination`]: fixed-size raw-data pages
//!
//! # Example
//!
//! ```no_run
//! use bikeshare_rust::io::load;
//! use bikeshare_rust::transformations::{filter, pages, TripColumn};
//! use bikeshare_rust::time::Month;
//!
//! let store = load("chicago").expect("Failed to load");
//! let june = filter(&store, Some(Month::June), None);
//! for page in pages(&june, &[TripColumn::StartTime, TripColumn::Hour], 5).unwrap() {
//!     println!("page {} has {} trips", page.number, page.len());
//! }
//! ```

pub mod cleaning;
pub mod filtering;
pub mod pagination;

pub use cleaning::{impute_mean, impute_mode, ImputedColumn};
pub use filtering::{filter, FilteredView, TripFilter};
pub use pagination::{pages, FieldValue, Page, Pages, TripColumn, ROUTE_SEPARATOR};
