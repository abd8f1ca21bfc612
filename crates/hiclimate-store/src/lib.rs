//! Observation store for the climate dataset
//!
//! The dataset is loaded once at startup and never written afterwards.
//! Every operation here is a read-only scan over the loaded rows.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::*;
pub use sqlite::*;

use hiclimate_core::{Measurement, Station};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Missing table: {0}")]
    MissingTable(&'static str),

    #[error("Unsupported value in {table}.{column} at row {rowid}")]
    UnsupportedValue {
        table: &'static str,
        column: &'static str,
        rowid: i64,
    },

    #[error("Missing value in {table}.{column} at row {rowid}")]
    MissingValue {
        table: &'static str,
        column: &'static str,
        rowid: i64,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only access to stations and measurements.
///
/// Date bounds are compared lexically against the stored `YYYY-MM-DD`
/// strings; bounds that are not dates simply match fewer rows.
pub trait ObservationStore: Send + Sync {
    /// All stations in store order
    fn all_stations(&self) -> Vec<&Station>;

    /// Measurements with `date >= date`, in store order
    fn measurements_on_or_after(&self, date: &str) -> Vec<&Measurement>;

    /// Measurements with `start <= date <= end`, in store order
    fn measurements_in_range(&self, start: &str, end: &str) -> Vec<&Measurement>;

    /// Open-ended variant used when no upper bound is given
    fn measurements_from(&self, date: &str) -> Vec<&Measurement> {
        self.measurements_on_or_after(date)
    }
}

/// Stable ascending sort by date; rows sharing a date keep store order
pub fn sort_by_date(rows: &mut [&Measurement]) {
    rows.sort_by(|a, b| a.date.cmp(&b.date));
}
