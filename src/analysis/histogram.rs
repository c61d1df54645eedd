// src/analysis/histogram.rs
use tracing::debug;
use crate::state::FlightStore;
use crate::state::selection::{DelayRange, HistogramSelection};
use super::{unique_carriers, Column, Derivation, DerivationError, DerivedTable, Palette, TabKind};

#[derive(Debug, Clone, Default)]
pub struct HistogramDerivation {
    palette: Palette,
}

struct HistogramRow {
    name: String,
    color: String,
    left: f64,
    right: f64,
    count: usize,
    proportion: f64,
}

/// Upper bound on bins per carrier.
pub const MAX_BINS: usize = 10_000;

/// Number of bins for a range and requested width: the truncated quotient,
/// never less than one and never above `MAX_BINS`.
pub fn bin_count(range: &DelayRange, bin_width: f64) -> Result<usize, DerivationError> {
    if !(bin_width > 0.0) || !bin_width.is_finite() {
        return Err(DerivationError::InvalidSelection(format!(
            "bin width must be positive, got {}", bin_width
        )));
    }

    let bins = (range.extent() / bin_width).trunc().max(1.0);
    if !(bins <= MAX_BINS as f64) {
        return Err(DerivationError::InvalidSelection(format!(
            "bin width {} gives more than {} bins", bin_width, MAX_BINS
        )));
    }
    Ok(bins as usize)
}

/// Equal-width edges spanning the range exactly. When the width does not
/// divide the range, bins are stretched rather than leaving a short tail.
pub fn bin_edges(range: &DelayRange, bins: usize) -> Vec<f64> {
    let mut edges: Vec<f64> = (0..bins)
        .map(|i| range.start + range.extent() * i as f64 / bins as f64)
        .collect();
    edges.push(range.end);
    edges
}

/// Counts values per bin. Bins are `[left, right)` except the last, which
/// also takes values equal to the range end. Out-of-range values and NaN are
/// ignored.
pub fn bin_counts(values: impl IntoIterator<Item = f64>, edges: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0; bins];
    if bins == 0 {
        return counts;
    }

    let (start, end) = (edges[0], edges[bins]);
    for value in values {
        if !(value >= start && value <= end) {
            continue;
        }

        let mut index = (((value - start) / (end - start)) * bins as f64).floor() as usize;
        index = index.min(bins - 1);
        // Settle float rounding against the actual edges
        while index > 0 && value < edges[index] {
            index -= 1;
        }
        while index < bins - 1 && value >= edges[index + 1] {
            index += 1;
        }
        counts[index] += 1;
    }
    counts
}

pub fn format_interval(left: f64, right: f64) -> String {
    format!("{} to {} minutes", left.trunc() as i64, right.trunc() as i64)
}

impl Derivation for HistogramDerivation {
    type Selection = HistogramSelection;

    const KIND: TabKind = TabKind::Histogram;

    fn compute(&self, store: &FlightStore, selection: &HistogramSelection) -> Result<DerivedTable, DerivationError> {
        selection.range.validate()?;
        let bins = bin_count(&selection.range, selection.bin_width)?;
        let edges = bin_edges(&selection.range, bins);
        let mut rows = Vec::new();

        for (i, carrier) in unique_carriers(&selection.carriers).into_iter().enumerate() {
            let delays = store.for_carrier(carrier).map(|r| r.arrival_delay_minutes);
            let counts = bin_counts(delays, &edges);
            let total: usize = counts.iter().sum();
            let color = self.palette.carrier_color(store, carrier, i);

            for (bin, &count) in counts.iter().enumerate() {
                // A carrier with nothing in range gets all-zero proportions
                let proportion = if total > 0 { count as f64 / total as f64 } else { 0.0 };
                rows.push(HistogramRow {
                    name: carrier.to_string(),
                    color: color.to_string(),
                    left: edges[bin],
                    right: edges[bin + 1],
                    count,
                    proportion,
                });
            }
        }

        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.left.total_cmp(&b.left)));
        debug!(carriers = selection.carriers.len(), bins, rows = rows.len(), "histogram derived");

        DerivedTable::new("histogram")
            .with_title("Histogram of Arrival Delays by Airline")
            .with_column("name", Column::Text(rows.iter().map(|r| r.name.clone()).collect()))?
            .with_column("color", Column::Text(rows.iter().map(|r| r.color.clone()).collect()))?
            .with_column("left", Column::Float(rows.iter().map(|r| r.left).collect()))?
            .with_column("right", Column::Float(rows.iter().map(|r| r.right).collect()))?
            .with_column("count", Column::Int(rows.iter().map(|r| r.count as i64).collect()))?
            .with_column("proportion", Column::Float(rows.iter().map(|r| r.proportion).collect()))?
            .with_column("f_proportion", Column::Text(
                rows.iter().map(|r| format!("{:.5}", r.proportion)).collect()
            ))?
            .with_column("f_interval", Column::Text(
                rows.iter().map(|r| format_interval(r.left, r.right)).collect()
            ))
    }
}
