// src/analysis/summary.rs
use std::collections::BTreeMap;
use statrs::statistics::Statistics;
use tracing::debug;
use crate::state::FlightStore;
use super::{Column, Derivation, DerivationError, DerivedTable, TabKind};

#[derive(Debug, Clone, Default)]
pub struct SummaryDerivation;

/// Quantile of sorted data, interpolating linearly between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Default)]
struct SummaryColumns {
    airline: Vec<String>,
    flights: Vec<i64>,
    mean: Vec<f64>,
    std: Vec<f64>,
    min: Vec<f64>,
    p25: Vec<f64>,
    median: Vec<f64>,
    p75: Vec<f64>,
    max: Vec<f64>,
}

impl Derivation for SummaryDerivation {
    type Selection = ();

    const KIND: TabKind = TabKind::Table;

    fn compute(&self, store: &FlightStore, _selection: &()) -> Result<DerivedTable, DerivationError> {
        let mut by_carrier: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in store.records() {
            by_carrier.entry(record.carrier_name.as_str())
                .or_default()
                .push(record.arrival_delay_minutes);
        }

        let mut out = SummaryColumns::default();
        for (carrier, mut delays) in by_carrier {
            delays.sort_by(|a, b| a.total_cmp(b));

            out.airline.push(carrier.to_string());
            out.flights.push(delays.len() as i64);
            out.mean.push(round2(delays.iter().mean()));
            out.std.push(delays.iter().std_dev());
            out.min.push(delays[0]);
            out.p25.push(quantile(&delays, 0.25));
            out.median.push(quantile(&delays, 0.5));
            out.p75.push(quantile(&delays, 0.75));
            out.max.push(delays[delays.len() - 1]);
        }

        debug!(carriers = out.airline.len(), "summary table derived");

        DerivedTable::new("summary")
            .with_column("airline", Column::Text(out.airline))?
            .with_column("flights", Column::Int(out.flights))?
            .with_column("mean", Column::Float(out.mean))?
            .with_column("std", Column::Float(out.std))?
            .with_column("min", Column::Float(out.min))?
            .with_column("p25", Column::Float(out.p25))?
            .with_column("median", Column::Float(out.median))?
            .with_column("p75", Column::Float(out.p75))?
            .with_column("max", Column::Float(out.max))
    }
}
