// src/analysis/map.rs
use std::collections::BTreeMap;
use tracing::debug;
use crate::config::RegionsFile;
use crate::state::FlightStore;
use crate::state::selection::MapSelection;
use super::{unique_carriers, Column, Derivation, DerivationError, DerivedTable, Palette, TabKind};

/// Aggregates for one (carrier, origin, destination) route.
#[derive(Debug, Clone)]
struct RouteStats {
    count: usize,
    delay_sum: f64,
    min_delay: f64,
    max_delay: f64,
    distance_sum: f64,
    origin_lat_lon: (f64, f64),
    dest_lat_lon: (f64, f64),
}

impl RouteStats {
    fn new(origin_lat_lon: (f64, f64), dest_lat_lon: (f64, f64)) -> Self {
        Self {
            count: 0,
            delay_sum: 0.0,
            min_delay: f64::INFINITY,
            max_delay: f64::NEG_INFINITY,
            distance_sum: 0.0,
            origin_lat_lon,
            dest_lat_lon,
        }
    }

    fn add(&mut self, delay: f64, distance: f64) {
        self.count += 1;
        self.delay_sum += delay;
        self.min_delay = self.min_delay.min(delay);
        self.max_delay = self.max_delay.max(delay);
        self.distance_sum += distance;
    }
}

#[derive(Default)]
struct MapColumns {
    carrier: Vec<String>,
    color: Vec<String>,
    origin: Vec<String>,
    dest: Vec<String>,
    count: Vec<i64>,
    mean_delay: Vec<f64>,
    min_delay: Vec<f64>,
    max_delay: Vec<f64>,
    distance: Vec<f64>,
    origin_x: Vec<f64>,
    origin_y: Vec<f64>,
    dest_x: Vec<f64>,
    dest_y: Vec<f64>,
    flight_x: Vec<Vec<f64>>,
    flight_y: Vec<Vec<f64>>,
}

/// Route map. Region outlines are fixed at construction and attached to
/// every derived table unchanged.
#[derive(Debug, Clone)]
pub struct MapDerivation {
    palette: Palette,
    regions: DerivedTable,
}

impl MapDerivation {
    pub fn new(geography: &RegionsFile, excluded: &[String]) -> Result<Self, DerivationError> {
        let visible: Vec<_> = geography.visible_regions(excluded).collect();

        let regions = DerivedTable::new("regions")
            .with_column("code", Column::Text(visible.iter().map(|r| r.code.clone()).collect()))?
            .with_column("name", Column::Text(visible.iter().map(|r| r.name.clone()).collect()))?
            .with_column("lons", Column::FloatList(visible.iter().map(|r| r.lons.clone()).collect()))?
            .with_column("lats", Column::FloatList(visible.iter().map(|r| r.lats.clone()).collect()))?;

        Ok(Self {
            palette: Palette::default(),
            regions,
        })
    }
}

impl Derivation for MapDerivation {
    type Selection = MapSelection;

    const KIND: TabKind = TabKind::Map;

    fn compute(&self, store: &FlightStore, selection: &MapSelection) -> Result<DerivedTable, DerivationError> {
        let mut out = MapColumns::default();

        for (i, carrier) in unique_carriers(&selection.carriers).into_iter().enumerate() {
            let mut routes: BTreeMap<(&str, &str), RouteStats> = BTreeMap::new();
            for record in store.for_carrier(carrier) {
                routes.entry((record.origin.as_str(), record.destination.as_str()))
                    .or_insert_with(|| RouteStats::new(record.origin_lat_lon, record.dest_lat_lon))
                    .add(record.arrival_delay_minutes, record.scheduled_distance_miles);
            }

            let color = self.palette.carrier_color(store, carrier, i);
            for ((origin, dest), stats) in routes {
                let (origin_lat, origin_lon) = stats.origin_lat_lon;
                let (dest_lat, dest_lon) = stats.dest_lat_lon;
                let n = stats.count as f64;

                out.carrier.push(carrier.to_string());
                out.color.push(color.to_string());
                out.origin.push(origin.to_string());
                out.dest.push(dest.to_string());
                out.count.push(stats.count as i64);
                out.mean_delay.push(stats.delay_sum / n);
                out.min_delay.push(stats.min_delay);
                out.max_delay.push(stats.max_delay);
                out.distance.push(stats.distance_sum / n);
                out.origin_x.push(origin_lon);
                out.origin_y.push(origin_lat);
                out.dest_x.push(dest_lon);
                out.dest_y.push(dest_lat);
                out.flight_x.push(vec![origin_lon, dest_lon]);
                out.flight_y.push(vec![origin_lat, dest_lat]);
            }
        }

        debug!(routes = out.carrier.len(), "map derived");

        Ok(DerivedTable::new("map")
            .with_title("Map of Flight Delays")
            .with_column("carrier", Column::Text(out.carrier))?
            .with_column("color", Column::Text(out.color))?
            .with_column("origin", Column::Text(out.origin))?
            .with_column("dest", Column::Text(out.dest))?
            .with_column("count", Column::Int(out.count))?
            .with_column("mean_delay", Column::Float(out.mean_delay))?
            .with_column("min_delay", Column::Float(out.min_delay))?
            .with_column("max_delay", Column::Float(out.max_delay))?
            .with_column("distance", Column::Float(out.distance))?
            .with_column("origin_x_loc", Column::Float(out.origin_x))?
            .with_column("origin_y_loc", Column::Float(out.origin_y))?
            .with_column("dest_x_loc", Column::Float(out.dest_x))?
            .with_column("dest_y_loc", Column::Float(out.dest_y))?
            .with_column("flight_x", Column::FloatList(out.flight_x))?
            .with_column("flight_y", Column::FloatList(out.flight_y))?
            .with_side_table(self.regions.clone()))
    }
}
