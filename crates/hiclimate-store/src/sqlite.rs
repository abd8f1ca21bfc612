//! SQLite dataset loader

use crate::schema::{self, measurement_columns, station_columns, tables};
use crate::{MemoryStore, StoreError, StoreResult};
use hiclimate_core::{Measurement, Reading, Station};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Read-only handle on the source dataset file
pub struct SqliteDataset {
    conn: Connection,
}

impl SqliteDataset {
    /// Open an existing dataset file without write access
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Load both tables into an in-memory store
    #[instrument(skip(self))]
    pub fn load(&self) -> StoreResult<MemoryStore> {
        let stations = self.load_stations()?;
        let measurements = self.load_measurements()?;
        info!(
            stations = stations.len(),
            measurements = measurements.len(),
            "Dataset loaded"
        );
        Ok(MemoryStore::new(stations, measurements))
    }

    pub fn load_stations(&self) -> StoreResult<Vec<Station>> {
        self.ensure_table(tables::STATION)?;

        let mut stmt = self.conn.prepare(schema::SELECT_STATIONS)?;
        let mut rows = stmt.query([])?;
        let mut stations = Vec::new();

        while let Some(row) = rows.next()? {
            let rowid: i64 = row.get(0)?;
            let table = tables::STATION;
            let station_id = required_text(row, 1, table, station_columns::STATION, rowid)?;
            let name = required_text(row, 2, table, station_columns::NAME, rowid)?;
            stations.push(Station {
                station_id,
                name,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                elevation: row.get(5)?,
            });
        }

        debug!("Loaded {} stations", stations.len());
        Ok(stations)
    }

    pub fn load_measurements(&self) -> StoreResult<Vec<Measurement>> {
        self.ensure_table(tables::MEASUREMENT)?;

        let mut stmt = self.conn.prepare(schema::SELECT_MEASUREMENTS)?;
        let mut rows = stmt.query([])?;
        let mut measurements = Vec::new();
        let mut skipped = 0usize;

        while let Some(row) = rows.next()? {
            let rowid: i64 = row.get(0)?;
            let table = tables::MEASUREMENT;
            // Rows without a date can never pass a date filter
            let Some(date) = row.get::<_, Option<String>>(2)? else {
                debug!(rowid, "Skipping measurement without a date");
                skipped += 1;
                continue;
            };
            // Station is informational only; no query reads it
            let station_id: String = row.get::<_, Option<String>>(1)?.unwrap_or_default();
            let prcp = reading(row, 3, table, measurement_columns::PRCP, rowid)?;
            let tobs = reading(row, 4, table, measurement_columns::TOBS, rowid)?.ok_or(
                StoreError::MissingValue {
                    table,
                    column: measurement_columns::TOBS,
                    rowid,
                },
            )?;

            measurements.push(Measurement {
                station_id,
                date,
                prcp,
                tobs,
            });
        }

        debug!(
            "Loaded {} measurements, skipped {} without a date",
            measurements.len(),
            skipped
        );
        Ok(measurements)
    }

    fn ensure_table(&self, table: &'static str) -> StoreResult<()> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |r| r.get(0),
            )
            .optional()?;

        match found {
            Some(_) => Ok(()),
            None => Err(StoreError::MissingTable(table)),
        }
    }
}

fn required_text(
    row: &Row<'_>,
    idx: usize,
    table: &'static str,
    column: &'static str,
    rowid: i64,
) -> StoreResult<String> {
    let value: Option<String> = row.get(idx)?;
    value.ok_or(StoreError::MissingValue {
        table,
        column,
        rowid,
    })
}

/// Numeric column keeping its SQLite storage class
fn reading(
    row: &Row<'_>,
    idx: usize,
    table: &'static str,
    column: &'static str,
    rowid: i64,
) -> StoreResult<Option<Reading>> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(v) => Ok(Some(Reading::Integer(v))),
        ValueRef::Real(v) => Ok(Some(Reading::Float(v))),
        ValueRef::Text(_) | ValueRef::Blob(_) => Err(StoreError::UnsupportedValue {
            table,
            column,
            rowid,
        }),
    }
}
