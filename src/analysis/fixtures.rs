// src/analysis/fixtures.rs
use crate::config::FlightRecord;
use crate::state::FlightStore;

fn airport(code: &str) -> (f64, f64) {
    match code {
        "JFK" => (40.64, -73.78),
        "LGA" => (40.78, -73.87),
        "EWR" => (40.69, -74.17),
        "MIA" => (25.79, -80.29),
        "ATL" => (33.64, -84.43),
        "ORD" => (41.98, -87.90),
        "SEA" => (47.45, -122.31),
        _ => (39.0, -98.0),
    }
}

pub fn flight(carrier: &str, origin: &str, destination: &str, delay: f64) -> FlightRecord {
    FlightRecord {
        origin: origin.to_string(),
        destination: destination.to_string(),
        carrier_code: carrier.chars().take(2).collect::<String>().to_uppercase(),
        carrier_name: carrier.to_string(),
        arrival_delay_minutes: delay,
        scheduled_distance_miles: 500.0 + delay.abs(),
        origin_lat_lon: airport(origin),
        dest_lat_lon: airport(destination),
    }
}

pub fn store(records: Vec<FlightRecord>) -> FlightStore {
    FlightStore::new(records)
}

pub fn carriers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
