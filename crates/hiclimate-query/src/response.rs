//! Response shapes for each endpoint
//!
//! Each record serialises as a JSON array with fields in declaration
//! order, so the wire format is `[date, min, avg, max]` rather than an
//! object. The precipitation series is the one mapping-shaped response.

use hiclimate_core::{DateString, Reading};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::collections::BTreeMap;

/// One `(date, prcp)` row of the precipitation series
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationRow {
    pub date: DateString,
    pub prcp: Option<Reading>,
}

/// `[station_id, name]`
#[derive(Debug, Clone, PartialEq)]
pub struct StationEntry {
    pub station_id: String,
    pub name: String,
}

/// `[date, tobs]`
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureObservation {
    pub date: DateString,
    pub tobs: Reading,
}

/// `[date, min_tobs, avg_tobs, max_tobs]` for one observed day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStat {
    pub date: DateString,
    pub min: Reading,
    pub avg: f64,
    pub max: Reading,
}

impl Serialize for PrecipitationRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.date)?;
        tup.serialize_element(&self.prcp)?;
        tup.end()
    }
}

impl Serialize for StationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.station_id)?;
        tup.serialize_element(&self.name)?;
        tup.end()
    }
}

impl Serialize for TemperatureObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.date)?;
        tup.serialize_element(&self.tobs)?;
        tup.end()
    }
}

impl Serialize for DailyStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(4)?;
        tup.serialize_element(&self.date)?;
        tup.serialize_element(&self.min)?;
        tup.serialize_element(&self.avg)?;
        tup.serialize_element(&self.max)?;
        tup.end()
    }
}

/// Date to precipitation mapping, one entry per distinct date
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct PrecipitationMap(BTreeMap<DateString, Option<Reading>>);

impl PrecipitationMap {
    /// Collapse rows into a mapping.
    ///
    /// When several rows share a date the last one in iteration order
    /// wins. Rows from different stations on the same day collapse to a
    /// single value; this is the published behaviour of the endpoint.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = PrecipitationRow>,
    {
        let mut map = BTreeMap::new();
        for row in rows {
            map.insert(row.date, row.prcp);
        }
        Self(map)
    }

    pub fn get(&self, date: &str) -> Option<&Option<Reading>> {
        self.0.get(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dates in ascending order
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, prcp: Option<f64>) -> PrecipitationRow {
        PrecipitationRow {
            date: date.to_string(),
            prcp: prcp.map(Reading::Float),
        }
    }

    #[test]
    fn precipitation_last_row_wins() {
        let map = PrecipitationMap::from_rows(vec![
            row("2017-01-01", Some(0.1)),
            row("2017-01-01", Some(0.3)),
            row("2017-01-02", None),
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("2017-01-01"), Some(&Some(Reading::Float(0.3))));
        insta::assert_snapshot!(
            serde_json::to_string(&map).unwrap(),
            @r#"{"2017-01-01":0.3,"2017-01-02":null}"#
        );
    }

    #[test]
    fn null_row_can_overwrite_a_value() {
        let map = PrecipitationMap::from_rows(vec![
            row("2017-01-01", Some(0.1)),
            row("2017-01-01", None),
        ]);
        assert_eq!(map.get("2017-01-01"), Some(&None));
    }

    #[test]
    fn empty_map_serialises_as_object() {
        let map = PrecipitationMap::default();
        assert!(map.is_empty());
        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
    }

    #[test]
    fn records_serialise_as_arrays() {
        let station = StationEntry {
            station_id: "USC1".into(),
            name: "Honolulu".into(),
        };
        let tobs = TemperatureObservation {
            date: "2017-01-01".into(),
            tobs: Reading::Integer(70),
        };
        let stat = DailyStat {
            date: "2017-01-01".into(),
            min: Reading::Integer(70),
            avg: 71.0,
            max: Reading::Integer(72),
        };

        insta::assert_snapshot!(serde_json::to_string(&station).unwrap(), @r#"["USC1","Honolulu"]"#);
        insta::assert_snapshot!(serde_json::to_string(&tobs).unwrap(), @r#"["2017-01-01",70]"#);
        insta::assert_snapshot!(serde_json::to_string(&stat).unwrap(), @r#"["2017-01-01",70,71.0,72]"#);
        assert_eq!(
            serde_json::to_string(&row("2017-01-02", None)).unwrap(),
            r#"["2017-01-02",null]"#
        );
    }
}
