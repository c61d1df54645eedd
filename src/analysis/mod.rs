// src/analysis/mod.rs
use std::fmt;
use thiserror::Error;
use crate::state::FlightStore;

pub mod table;
pub mod palette;
pub mod histogram;
pub mod density;
pub mod map;
pub mod routes;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use table::{Column, DerivedTable};
pub use palette::Palette;
pub use histogram::HistogramDerivation;
pub use density::{Bandwidth, DensityDerivation};
pub use map::MapDerivation;
pub use routes::RouteDerivation;
pub use summary::SummaryDerivation;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivationError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Insufficient data: {0} point(s) cannot support a density estimate")]
    InsufficientData(usize),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Statistics error: {0}")]
    Statistics(String),
}

/// The dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TabKind {
    Histogram,
    Density,
    Table,
    Map,
    Routes,
}

impl TabKind {
    pub const ALL: [TabKind; 5] = [
        TabKind::Histogram,
        TabKind::Density,
        TabKind::Table,
        TabKind::Map,
        TabKind::Routes,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TabKind::Histogram => "Histogram",
            TabKind::Density => "Density Plot",
            TabKind::Table => "Summary Table",
            TabKind::Map => "Flight Map",
            TabKind::Routes => "Route Details",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Pure transformation of the flight store and one tab's selection into a
/// table ready for plotting. Implementations hold no mutable state.
pub trait Derivation {
    type Selection: Clone + fmt::Debug;

    const KIND: TabKind;

    fn compute(&self, store: &FlightStore, selection: &Self::Selection) -> Result<DerivedTable, DerivationError>;
}

/// Drops repeated carrier names while keeping first-seen order.
pub(crate) fn unique_carriers(carriers: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(carriers.len());
    for carrier in carriers {
        if !seen.contains(&carrier.as_str()) {
            seen.push(carrier);
        }
    }
    seen
}
