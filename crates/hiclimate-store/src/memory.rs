//! In-memory observation store

use crate::ObservationStore;
use hiclimate_core::{Measurement, Station};
use tracing::{debug, instrument};

/// Store holding both collections in load order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stations: Vec<Station>,
    measurements: Vec<Measurement>,
}

impl MemoryStore {
    pub fn new(stations: Vec<Station>, measurements: Vec<Measurement>) -> Self {
        Self {
            stations,
            measurements,
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements.len()
    }

    fn scan<F>(&self, keep: F) -> Vec<&Measurement>
    where
        F: Fn(&str) -> bool,
    {
        self.measurements
            .iter()
            .filter(|m| keep(m.date.as_str()))
            .collect()
    }
}

impl ObservationStore for MemoryStore {
    fn all_stations(&self) -> Vec<&Station> {
        self.stations.iter().collect()
    }

    #[instrument(skip(self))]
    fn measurements_on_or_after(&self, date: &str) -> Vec<&Measurement> {
        let rows = self.scan(|d| d >= date);
        debug!("Matched {} measurements on or after {}", rows.len(), date);
        rows
    }

    #[instrument(skip(self))]
    fn measurements_in_range(&self, start: &str, end: &str) -> Vec<&Measurement> {
        let rows = self.scan(|d| start <= d && d <= end);
        debug!(
            "Matched {} measurements between {} and {}",
            rows.len(),
            start,
            end
        );
        rows
    }
}
