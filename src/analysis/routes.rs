// src/analysis/routes.rs
use tracing::debug;
use crate::state::FlightStore;
use crate::state::selection::RouteSelection;
use super::{Column, Derivation, DerivationError, DerivedTable, Palette, TabKind};

/// Name of the side table mapping y positions to carrier names.
pub const CARRIER_INDEX: &str = "carrier_index";

#[derive(Debug, Clone, Default)]
pub struct RouteDerivation {
    palette: Palette,
}

pub fn route_title(origin: &str, destination: &str, has_flights: bool) -> String {
    if has_flights {
        format!("Arrival Delays for Flights from {} to {}", origin, destination)
    } else {
        format!("No Flights on Record from {} to {}", origin, destination)
    }
}

impl Derivation for RouteDerivation {
    type Selection = RouteSelection;

    const KIND: TabKind = TabKind::Routes;

    fn compute(&self, store: &FlightStore, selection: &RouteSelection) -> Result<DerivedTable, DerivationError> {
        // Carriers in order of first appearance; the index is only a y position
        let mut carriers: Vec<&str> = Vec::new();
        let mut delays: Vec<Vec<f64>> = Vec::new();

        let matching = store.records().iter()
            .filter(|r| r.origin == selection.origin && r.destination == selection.destination);
        for record in matching {
            let index = match carriers.iter().position(|c| *c == record.carrier_name) {
                Some(index) => index,
                None => {
                    carriers.push(&record.carrier_name);
                    delays.push(Vec::new());
                    carriers.len() - 1
                }
            };
            delays[index].push(record.arrival_delay_minutes);
        }

        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut names = Vec::new();
        for (index, carrier_delays) in delays.iter().enumerate() {
            for &delay in carrier_delays {
                x.push(delay);
                y.push(index as i64);
                names.push(carriers[index].to_string());
            }
        }

        debug!(
            origin = %selection.origin,
            destination = %selection.destination,
            flights = x.len(),
            carriers = carriers.len(),
            "route detail derived"
        );

        let index_map = DerivedTable::new(CARRIER_INDEX)
            .with_column("index", Column::Int((0..carriers.len() as i64).collect()))?
            .with_column("carrier", Column::Text(carriers.iter().map(|c| c.to_string()).collect()))?
            .with_column("color", Column::Text(
                carriers.iter()
                    .enumerate()
                    .map(|(i, c)| self.palette.carrier_color(store, c, i).to_string())
                    .collect()
            ))?;

        Ok(DerivedTable::new("routes")
            .with_title(route_title(&selection.origin, &selection.destination, !x.is_empty()))
            .with_column("x", Column::Float(x))?
            .with_column("y", Column::Int(y))?
            .with_column("carrier", Column::Text(names))?
            .with_side_table(index_map))
    }
}
