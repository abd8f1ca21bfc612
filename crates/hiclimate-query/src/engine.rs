//! The four query shapes over an observation store

use crate::response::{
    DailyStat, PrecipitationMap, PrecipitationRow, StationEntry, TemperatureObservation,
};
use hiclimate_core::{daily_temperature_summaries, Measurement, TrailingWindow};
use hiclimate_store::{sort_by_date, ObservationStore};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Stateless query engine over a shared read-only store
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn ObservationStore>,
    window: TrailingWindow,
}

impl QueryEngine {
    /// Engine using the fixed dataset anchor for the trailing queries
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self::with_window(store, TrailingWindow::default())
    }

    pub fn with_window(store: Arc<dyn ObservationStore>, window: TrailingWindow) -> Self {
        Self { store, window }
    }

    pub fn window(&self) -> TrailingWindow {
        self.window
    }

    /// `(date, prcp)` for the trailing year, ascending by date
    #[instrument(skip(self))]
    pub fn precipitation(&self) -> Vec<PrecipitationRow> {
        let rows: Vec<PrecipitationRow> = self
            .trailing_year()
            .into_iter()
            .map(|m| PrecipitationRow {
                date: m.date.clone(),
                prcp: m.prcp,
            })
            .collect();

        debug!("Precipitation series has {} rows", rows.len());
        rows
    }

    /// Precipitation series collapsed to one value per date
    pub fn precipitation_map(&self) -> PrecipitationMap {
        PrecipitationMap::from_rows(self.precipitation())
    }

    /// Every station as `(station_id, name)`, in store order
    #[instrument(skip(self))]
    pub fn stations(&self) -> Vec<StationEntry> {
        self.store
            .all_stations()
            .into_iter()
            .map(|s| StationEntry {
                station_id: s.station_id.clone(),
                name: s.name.clone(),
            })
            .collect()
    }

    /// `(date, tobs)` for the trailing year; rows sharing a date are all kept
    #[instrument(skip(self))]
    pub fn temperature_observations(&self) -> Vec<TemperatureObservation> {
        let rows: Vec<TemperatureObservation> = self
            .trailing_year()
            .into_iter()
            .map(|m| TemperatureObservation {
                date: m.date.clone(),
                tobs: m.tobs,
            })
            .collect();

        debug!("Temperature series has {} rows", rows.len());
        rows
    }

    /// Daily min/avg/max temperature from `start`, optionally up to `end`.
    ///
    /// Both bounds are inclusive and compared as strings. Inputs that are
    /// not dates are not rejected; they just match fewer rows.
    #[instrument(skip(self))]
    pub fn temperature_stats(&self, start: &str, end: Option<&str>) -> Vec<DailyStat> {
        let rows = match end {
            Some(end) => self.store.measurements_in_range(start, end),
            None => self.store.measurements_from(start),
        };

        let stats: Vec<DailyStat> = daily_temperature_summaries(rows)
            .into_iter()
            .map(|(date, summary)| DailyStat {
                date,
                min: summary.min,
                avg: summary.avg,
                max: summary.max,
            })
            .collect();

        debug!("Temperature stats have {} days", stats.len());
        stats
    }

    fn trailing_year(&self) -> Vec<&Measurement> {
        let mut rows = self.store.measurements_from(&self.window.start_key());
        sort_by_date(&mut rows);
        rows
    }
}
