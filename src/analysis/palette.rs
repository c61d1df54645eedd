// src/analysis/palette.rs
use crate::state::FlightStore;

/// Category20_16, sorted by hex code.
pub const CATEGORY20_16: [&str; 16] = [
    "#1f77b4", "#2ca02c", "#7f7f7f", "#8c564b",
    "#9467bd", "#98df8a", "#aec7e8", "#c49c94",
    "#c5b0d5", "#c7c7c7", "#d62728", "#e377c2",
    "#f7b6d2", "#ff7f0e", "#ff9896", "#ffbb78",
];

/// Categorical carrier colours. Indices past the end wrap around, so more
/// than sixteen carriers reuse colours in order instead of running out.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn category20_16() -> Self {
        Self {
            colors: CATEGORY20_16.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// Colour keyed on the carrier's place in the full sorted carrier list,
    /// so it stays the same whatever else is selected. Carriers unknown to
    /// the store fall back to `fallback_index`.
    pub fn carrier_color(&self, store: &FlightStore, carrier: &str, fallback_index: usize) -> &str {
        self.color(store.carrier_position(carrier).unwrap_or(fallback_index))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::category20_16()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{flight, store};

    #[test]
    fn test_palette_wraps_around() {
        let palette = Palette::category20_16();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.color(0), palette.color(16));
        assert_eq!(palette.color(17), "#2ca02c");
    }

    #[test]
    fn test_carrier_color_is_stable_across_selections() {
        let store = store(vec![
            flight("Alaska", "EWR", "SEA", 0.0),
            flight("Delta", "JFK", "ATL", 0.0),
        ]);
        let palette = Palette::default();
        assert_eq!(palette.carrier_color(&store, "Delta", 0), palette.color(1));
        assert_eq!(palette.carrier_color(&store, "Nowhere Air", 5), palette.color(5));
    }
}
