// src/state/selection.rs
use serde::{Serialize, Deserialize};
use crate::analysis::DerivationError;
use crate::analysis::density::Bandwidth;
use crate::config::DashboardSettings;
use crate::state::FlightStore;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DelayRange {
    pub start: f64,
    pub end: f64,
}

impl DelayRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn extent(&self) -> f64 {
        self.end - self.start
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    pub fn validate(&self) -> Result<(), DerivationError> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start >= self.end {
            return Err(DerivationError::InvalidSelection(format!(
                "delay range [{}, {}] is empty", self.start, self.end
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSelection {
    pub carriers: Vec<String>,
    pub range: DelayRange,
    pub bin_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensitySelection {
    pub carriers: Vec<String>,
    pub range: DelayRange,
    pub bandwidth: Bandwidth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSelection {
    pub carriers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSelection {
    pub origin: String,
    pub destination: String,
}

fn initial_carriers(settings: &DashboardSettings, store: &FlightStore) -> Vec<String> {
    store.carriers().iter()
        .take(settings.initial_carriers)
        .cloned()
        .collect()
}

impl HistogramSelection {
    pub fn initial(settings: &DashboardSettings, store: &FlightStore) -> Self {
        let defaults = &settings.histogram;
        Self {
            carriers: initial_carriers(settings, store),
            range: DelayRange::new(defaults.range_start, defaults.range_end),
            bin_width: defaults.bin_width,
        }
    }
}

impl DensitySelection {
    pub fn initial(settings: &DashboardSettings, store: &FlightStore) -> Self {
        let defaults = &settings.density;
        Self {
            carriers: initial_carriers(settings, store),
            range: DelayRange::new(defaults.range_start, defaults.range_end),
            bandwidth: defaults.bandwidth.map(Bandwidth::Factor).unwrap_or_default(),
        }
    }
}

impl MapSelection {
    pub fn initial(settings: &DashboardSettings, store: &FlightStore) -> Self {
        Self {
            carriers: initial_carriers(settings, store),
        }
    }
}

impl RouteSelection {
    pub fn initial(settings: &DashboardSettings) -> Self {
        Self {
            origin: settings.routes.origin.clone(),
            destination: settings.routes.destination.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{flight, store};

    #[test]
    fn test_initial_selections_follow_settings() {
        let store = store(vec![
            flight("United", "EWR", "ORD", 3.0),
            flight("Delta", "JFK", "ATL", 1.0),
            flight("American", "LGA", "MIA", 0.0),
        ]);
        let settings = DashboardSettings::default();

        let hist = HistogramSelection::initial(&settings, &store);
        assert_eq!(hist.carriers, vec!["American", "Delta"]);
        assert_eq!(hist.range, DelayRange::new(-60.0, 120.0));
        assert_eq!(hist.bin_width, 5.0);

        let density = DensitySelection::initial(&settings, &store);
        assert_eq!(density.bandwidth, Bandwidth::Scott);

        let routes = RouteSelection::initial(&settings);
        assert_eq!((routes.origin.as_str(), routes.destination.as_str()), ("JFK", "MIA"));
    }

    #[test]
    fn test_range_validation() {
        assert!(DelayRange::new(-60.0, 120.0).validate().is_ok());
        assert!(DelayRange::new(10.0, 10.0).validate().is_err());
        assert!(DelayRange::new(f64::NAN, 10.0).validate().is_err());
        assert!(DelayRange::new(0.0, 5.0).contains(5.0));
    }
}
