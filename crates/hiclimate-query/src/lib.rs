//! Query engine and response shapes for the climate API
//!
//! The engine owns the date windows, filters, and grouping for the four
//! query shapes. The response module turns engine rows into the exact JSON
//! shape each endpoint serves.

pub mod engine;
pub mod response;

pub use engine::*;
pub use response::*;
