//! Per-day temperature rollups

use crate::types::{DateString, Measurement, Reading};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Accumulator for min/avg/max over the readings of one group
#[derive(Debug, Clone, Default)]
pub struct TemperatureAccumulator {
    min: Option<Reading>,
    max: Option<Reading>,
    sum: f64,
    count: usize,
}

/// Result of a non-empty accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSummary {
    pub min: Reading,
    pub avg: f64,
    pub max: Reading,
    pub count: usize,
}

impl TemperatureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: Reading) {
        // Ties keep the first reading seen
        match self.min {
            Some(current) if value.total_cmp(&current) != Ordering::Less => {}
            _ => self.min = Some(value),
        }
        match self.max {
            Some(current) if value.total_cmp(&current) != Ordering::Greater => {}
            _ => self.max = Some(value),
        }
        self.sum += value.as_f64();
        self.count += 1;
    }

    pub fn summary(&self) -> Option<TemperatureSummary> {
        let (min, max) = (self.min?, self.max?);
        Some(TemperatureSummary {
            min,
            avg: self.sum / self.count as f64,
            max,
            count: self.count,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Group measurements by date and summarise their temperature readings.
///
/// Only dates that occur in the input get an entry, and the map iterates
/// in ascending date order.
pub fn daily_temperature_summaries<'a, I>(
    measurements: I,
) -> BTreeMap<DateString, TemperatureSummary>
where
    I: IntoIterator<Item = &'a Measurement>,
{
    let mut accumulators: BTreeMap<DateString, TemperatureAccumulator> = BTreeMap::new();

    for measurement in measurements {
        accumulators
            .entry(measurement.date.clone())
            .or_default()
            .add(measurement.tobs);
    }

    accumulators
        .into_iter()
        .filter_map(|(date, acc)| acc.summary().map(|summary| (date, summary)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_min_max_avg() {
        let mut acc = TemperatureAccumulator::new();
        acc.add(Reading::Integer(70));
        acc.add(Reading::Integer(65));
        acc.add(Reading::Integer(75));

        let summary = acc.summary().unwrap();
        assert_eq!(summary.min, Reading::Integer(65));
        assert_eq!(summary.max, Reading::Integer(75));
        assert_eq!(summary.avg, 70.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_accumulator_keeps_reading_type() {
        let mut acc = TemperatureAccumulator::new();
        acc.add(Reading::Float(71.5));
        acc.add(Reading::Integer(70));

        let summary = acc.summary().unwrap();
        assert_eq!(summary.min, Reading::Integer(70));
        assert_eq!(summary.max, Reading::Float(71.5));
        assert_eq!(summary.avg, 70.75);
    }

    #[test]
    fn test_accumulator_empty() {
        let acc = TemperatureAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.summary(), None);
    }

    #[test]
    fn test_daily_summaries_group_and_order() {
        let rows = vec![
            Measurement::new("S1", "2017-01-02", None, 68),
            Measurement::new("S1", "2017-01-01", Some(Reading::Float(0.1)), 70),
            Measurement::new("S2", "2017-01-01", Some(Reading::Float(0.3)), 72),
        ];

        let summaries = daily_temperature_summaries(&rows);
        let dates: Vec<&str> = summaries.keys().map(String::as_str).collect();
        assert_eq!(dates, vec!["2017-01-01", "2017-01-02"]);

        let first = summaries["2017-01-01"];
        assert_eq!(first.min, Reading::Integer(70));
        assert_eq!(first.avg, 71.0);
        assert_eq!(first.max, Reading::Integer(72));
        assert_eq!(summaries["2017-01-02"].count, 1);
    }
}
