//! Layout of the source SQLite dataset
//!
//! The dataset file is provisioned externally (the Hawaii climate
//! database). These names must match it exactly.

/// Table names
pub mod tables {
    pub const STATION: &str = "station";
    pub const MEASUREMENT: &str = "measurement";
}

/// Station columns, in select order
pub mod station_columns {
    pub const STATION: &str = "station";
    pub const NAME: &str = "name";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const ELEVATION: &str = "elevation";
}

/// Measurement columns, in select order
pub mod measurement_columns {
    pub const STATION: &str = "station";
    pub const DATE: &str = "date";
    pub const PRCP: &str = "prcp";
    pub const TOBS: &str = "tobs";
}

pub const SELECT_STATIONS: &str =
    "SELECT rowid, station, name, latitude, longitude, elevation FROM station ORDER BY rowid";

pub const SELECT_MEASUREMENTS: &str =
    "SELECT rowid, station, date, prcp, tobs FROM measurement ORDER BY rowid";

/// DDL equivalent to the production dataset, for fixtures
pub const DATASET_DDL: &str = r#"
CREATE TABLE station (
    id INTEGER NOT NULL,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT,
    PRIMARY KEY (id)
);
CREATE TABLE measurement (
    id INTEGER NOT NULL,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT,
    PRIMARY KEY (id)
);
"#;
