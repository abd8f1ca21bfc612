//! Core data types for stations and daily measurements

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Calendar date as stored in the dataset (`YYYY-MM-DD`)
///
/// Dates stay strings end to end. ISO formatting makes lexical order equal
/// to chronological order, and request dates are compared the same way.
pub type DateString = String;

/// A numeric reading that keeps the storage type it was loaded with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reading {
    Integer(i64),
    Float(f64),
}

impl Reading {
    pub fn as_f64(&self) -> f64 {
        match self {
            Reading::Integer(v) => *v as f64,
            Reading::Float(v) => *v,
        }
    }

    /// Numeric comparison across storage types
    pub fn total_cmp(&self, other: &Reading) -> Ordering {
        match (self, other) {
            (Reading::Integer(a), Reading::Integer(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Reading::Integer(value)
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::Float(value)
    }
}

/// Observing station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    /// External station identifier (e.g. `USC00519397`)
    pub station_id: String,

    /// Display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Station {
    pub fn new(station_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }
}

/// One station/date row of the measurement table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Station that reported the row; not required to resolve
    pub station_id: String,

    pub date: DateString,

    /// Precipitation, absent on some days
    pub prcp: Option<Reading>,

    /// Temperature observation
    pub tobs: Reading,
}

impl Measurement {
    pub fn new(
        station_id: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<Reading>,
        tobs: impl Into<Reading>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date: date.into(),
            prcp,
            tobs: tobs.into(),
        }
    }
}
