//! Counting primitives shared by the statistics services.
//!
//! # Components
//!
//! - [`frequency`]: insertion-ordered frequency tables and mode selection

pub mod frequency;

pub use frequency::{first_max_index, FrequencyTable, ModeCount};
