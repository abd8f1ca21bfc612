//! Core data types, date windows, and daily rollups for the climate dataset
//!
//! This crate provides the station/measurement model shared by the store,
//! the query engine, and the HTTP layer.

pub mod dates;
pub mod rollups;
pub mod types;

pub use dates::*;
pub use rollups::*;
pub use types::*;
