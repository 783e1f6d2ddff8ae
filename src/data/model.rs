use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metric – which measured field is on the y axis
// ---------------------------------------------------------------------------

/// The two fields every sensor reports. Wire names (`tempf`, `humidityi`)
/// come from the DHT11 firmware and are kept only at the serde boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    /// Label used for radio buttons and y-axis captions.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature (°F)",
            Metric::Humidity => "humidity (%)",
        }
    }
}

// ---------------------------------------------------------------------------
// Reading – one row of the pivoted query result
// ---------------------------------------------------------------------------

/// A single sensor sample: one timestamp, one location, both fields.
/// Immutable once loaded; the full set lives in memory for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub time: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "tempf")]
    pub temperature: f64,
    #[serde(rename = "humidityi")]
    pub humidity: f64,
}

impl Reading {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonReading – one row of the offline box-plot dataset
// ---------------------------------------------------------------------------

/// A row of the offline comparison dataset. Collected under controlled
/// conditions, so each row also records the ventilator state and the
/// coarse outdoor-humidity bucket at sampling time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReading {
    pub location: String,
    #[serde(rename = "tempf")]
    pub temperature: f64,
    #[serde(rename = "humidityi")]
    pub humidity: f64,
    pub ventilator: String,
    #[serde(rename = "Outside-humidity")]
    pub outside_humidity: String,
}

impl ComparisonReading {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }
}

// ---------------------------------------------------------------------------
// ReadingSet – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full query result with a precomputed location index.
#[derive(Debug, Clone)]
pub struct ReadingSet {
    /// All readings, in query order.
    pub readings: Vec<Reading>,
    /// Sorted set of location ids present in the data.
    pub locations: BTreeSet<String>,
}

impl ReadingSet {
    /// Build the location index from the loaded readings.
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        let locations = readings.iter().map(|r| r.location.clone()).collect();
        ReadingSet {
            readings,
            locations,
        }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// First and last calendar date present, or `None` when empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.readings.iter().map(|r| r.time.date_naive());
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Group one field's values by location, in location order.
    pub fn values_by_location(&self, metric: Metric) -> BTreeMap<String, Vec<f64>> {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for reading in &self.readings {
            groups
                .entry(reading.location.clone())
                .or_default()
                .push(reading.value(metric));
        }
        groups
    }
}

// ---------------------------------------------------------------------------
// Location names
// ---------------------------------------------------------------------------

/// Display names for the fixed sensor deployment.
const LOCATION_NAMES: &[(&str, &str)] = &[
    ("1", "Indoor A"),
    ("2", "Basement"),
    ("3", "Indoor B"),
    ("4", "Outdoors"),
];

/// Human label for a location id; unknown ids are shown as-is.
pub fn location_label(id: &str) -> String {
    LOCATION_NAMES
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(id, name)| format!("{id}: {name}"))
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(day: u32, hour: u32, location: &str, temp: f64) -> Reading {
        Reading {
            time: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            location: location.to_string(),
            temperature: temp,
            humidity: 40.0,
        }
    }

    #[test]
    fn from_readings_indexes_locations() {
        let set = ReadingSet::from_readings(vec![
            reading(1, 8, "2", 64.0),
            reading(1, 9, "1", 71.0),
            reading(2, 8, "2", 63.5),
        ]);
        assert_eq!(set.len(), 3);
        let locations: Vec<&str> = set.locations.iter().map(String::as_str).collect();
        assert_eq!(locations, vec!["1", "2"]);
    }

    #[test]
    fn date_bounds_span_the_data() {
        let set = ReadingSet::from_readings(vec![
            reading(5, 12, "1", 70.0),
            reading(2, 23, "1", 69.0),
            reading(9, 0, "1", 72.0),
        ]);
        let (start, end) = set.date_bounds().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn date_bounds_empty() {
        assert_eq!(ReadingSet::from_readings(Vec::new()).date_bounds(), None);
    }

    #[test]
    fn values_grouped_by_location() {
        let set = ReadingSet::from_readings(vec![
            reading(1, 8, "1", 71.0),
            reading(1, 9, "2", 64.0),
            reading(1, 10, "1", 72.0),
        ]);
        let groups = set.values_by_location(Metric::Temperature);
        assert_eq!(groups["1"], vec![71.0, 72.0]);
        assert_eq!(groups["2"], vec![64.0]);
    }

    #[test]
    fn known_and_unknown_location_labels() {
        assert_eq!(location_label("2"), "2: Basement");
        assert_eq!(location_label("garage"), "garage");
    }
}
