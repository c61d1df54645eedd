// src/config/flight.rs
use serde::{Serialize, Deserialize};

/// A single flight as loaded from the records file. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub origin: String,
    pub destination: String,
    pub carrier_code: String,
    pub carrier_name: String,
    pub arrival_delay_minutes: f64,
    pub scheduled_distance_miles: f64,
    pub origin_lat_lon: (f64, f64),
    pub dest_lat_lon: (f64, f64),
}

/// One CSV row. Column names follow the flight-records file headers; any
/// other columns in the file (such as the leading index) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRow {
    pub origin: Option<String>,
    pub dest: Option<String>,
    pub carrier: Option<String>,
    pub name: Option<String>,
    pub arr_delay: Option<f64>,
    pub distance: Option<f64>,
    pub start_lati: Option<f64>,
    pub start_long: Option<f64>,
    pub end_lati: Option<f64>,
    pub end_long: Option<f64>,
}

impl FlightRow {
    /// Converts the row into a record, or `None` if any required value is
    /// missing. NaN and infinite numbers count as missing.
    pub fn into_record(self) -> Option<FlightRecord> {
        let finite = |value: Option<f64>| value.filter(|v| v.is_finite());

        Some(FlightRecord {
            origin: self.origin?,
            destination: self.dest?,
            carrier_code: self.carrier?,
            carrier_name: self.name?,
            arrival_delay_minutes: finite(self.arr_delay)?,
            scheduled_distance_miles: finite(self.distance)?,
            origin_lat_lon: (finite(self.start_lati)?, finite(self.start_long)?),
            dest_lat_lon: (finite(self.end_lati)?, finite(self.end_long)?),
        })
    }
}

impl From<&FlightRecord> for FlightRow {
    fn from(record: &FlightRecord) -> Self {
        Self {
            origin: Some(record.origin.clone()),
            dest: Some(record.destination.clone()),
            carrier: Some(record.carrier_code.clone()),
            name: Some(record.carrier_name.clone()),
            arr_delay: Some(record.arrival_delay_minutes),
            distance: Some(record.scheduled_distance_miles),
            start_lati: Some(record.origin_lat_lon.0),
            start_long: Some(record.origin_lat_lon.1),
            end_lati: Some(record.dest_lat_lon.0),
            end_long: Some(record.dest_lat_lon.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_missing_delay_is_dropped() {
        let row = FlightRow {
            origin: Some("JFK".to_string()),
            dest: Some("MIA".to_string()),
            carrier: Some("DL".to_string()),
            name: Some("Delta".to_string()),
            arr_delay: None,
            distance: Some(1089.0),
            start_lati: Some(40.6),
            start_long: Some(-73.8),
            end_lati: Some(25.8),
            end_long: Some(-80.3),
        };
        assert!(row.into_record().is_none());
    }

    #[test]
    fn test_record_survives_row_conversion() {
        let record = FlightRecord {
            origin: "LGA".to_string(),
            destination: "ORD".to_string(),
            carrier_code: "UA".to_string(),
            carrier_name: "United".to_string(),
            arrival_delay_minutes: -4.0,
            scheduled_distance_miles: 733.0,
            origin_lat_lon: (40.8, -73.9),
            dest_lat_lon: (41.9, -87.9),
        };
        let back = FlightRow::from(&record).into_record();
        assert_eq!(back, Some(record));
    }
}
