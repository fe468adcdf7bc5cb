//! Core domain models for bikeshare trip exploration.
//!
//! This module defines the trip record, the per-city record store and the
//! error taxonomy shared by every stage of the filter-and-aggregate pipeline.

pub mod domain;
pub mod error;
pub mod store;

pub use domain::{City, TripRecord};
pub use error::{BikeshareError, BikeshareResult};
pub use store::RecordStore;
