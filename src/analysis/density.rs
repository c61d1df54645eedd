// src/analysis/density.rs
use serde::{Serialize, Deserialize};
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;
use tracing::{debug, warn};
use crate::state::FlightStore;
use crate::state::selection::DensitySelection;
use super::{unique_carriers, Column, Derivation, DerivationError, DerivedTable, Palette, TabKind};

/// Points at which every density curve is evaluated.
pub const DENSITY_POINTS: usize = 100;

/// Kernel bandwidth. The automatic rules pick a factor from the sample size;
/// `Factor` uses the given value. Either way the kernel standard deviation is
/// the factor times the sample standard deviation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Bandwidth {
    Scott,
    Silverman,
    Factor(f64),
}

impl Default for Bandwidth {
    fn default() -> Self {
        Bandwidth::Scott
    }
}

impl Bandwidth {
    pub fn is_auto(&self) -> bool {
        !matches!(self, Bandwidth::Factor(_))
    }

    pub fn validate(&self) -> Result<(), DerivationError> {
        match self {
            Bandwidth::Factor(f) if !(*f > 0.0) || !f.is_finite() => Err(DerivationError::InvalidSelection(
                format!("bandwidth must be positive, got {}", f)
            )),
            _ => Ok(()),
        }
    }

    pub fn factor(&self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            Bandwidth::Scott => n.powf(-0.2),
            Bandwidth::Silverman => (n * 3.0 / 4.0).powf(-0.2),
            Bandwidth::Factor(f) => *f,
        }
    }
}

/// One-dimensional Gaussian kernel density estimate.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    kernel: Normal,
    sigma: f64,
}

impl GaussianKde {
    pub fn fit(samples: Vec<f64>, bandwidth: Bandwidth) -> Result<Self, DerivationError> {
        bandwidth.validate()?;
        if samples.len() < 2 {
            return Err(DerivationError::InsufficientData(samples.len()));
        }

        let spread = samples.iter().std_dev();
        if !spread.is_finite() || spread <= 0.0 {
            // Identical values leave a singular covariance
            return Err(DerivationError::InsufficientData(samples.len()));
        }

        let sigma = bandwidth.factor(samples.len()) * spread;
        let kernel = Normal::new(0.0, sigma)
            .map_err(|e| DerivationError::Statistics(e.to_string()))?;

        Ok(Self { samples, kernel, sigma })
    }

    /// Standard deviation of each kernel.
    #[cfg(test)]
    pub fn kernel_sigma(&self) -> f64 {
        self.sigma
    }

    pub fn pdf(&self, x: f64) -> f64 {
        let total: f64 = self.samples.iter()
            .map(|xi| self.kernel.pdf(x - xi))
            .sum();
        total / self.samples.len() as f64
    }
}

/// `count` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut points: Vec<f64> = (0..count - 1).map(|i| start + step * i as f64).collect();
            points.push(end);
            points
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DensityDerivation {
    palette: Palette,
}

impl Derivation for DensityDerivation {
    type Selection = DensitySelection;

    const KIND: TabKind = TabKind::Density;

    fn compute(&self, store: &FlightStore, selection: &DensitySelection) -> Result<DerivedTable, DerivationError> {
        selection.range.validate()?;
        selection.bandwidth.validate()?;

        let x = linspace(selection.range.start, selection.range.end, DENSITY_POINTS);
        let mut labels = Vec::new();
        let mut colors = Vec::new();
        let mut xs = Vec::new();
        let mut ys = Vec::new();

        for (i, carrier) in unique_carriers(&selection.carriers).into_iter().enumerate() {
            let samples: Vec<f64> = store.for_carrier(carrier)
                .map(|r| r.arrival_delay_minutes)
                .filter(|d| selection.range.contains(*d))
                .collect();

            let kde = match GaussianKde::fit(samples, selection.bandwidth) {
                Ok(kde) => kde,
                Err(DerivationError::InsufficientData(points)) => {
                    warn!(carrier, points, "omitting carrier from density plot: not enough data in range");
                    continue;
                }
                Err(e) => return Err(e),
            };

            labels.push(carrier.to_string());
            colors.push(self.palette.carrier_color(store, carrier, i).to_string());
            ys.push(x.iter().map(|&v| kde.pdf(v)).collect::<Vec<_>>());
            xs.push(x.clone());
        }

        debug!(requested = selection.carriers.len(), plotted = labels.len(), "density derived");

        DerivedTable::new("density")
            .with_title("Density Plot of Arrival Delays by Airline")
            .with_column("label", Column::Text(labels))?
            .with_column("color", Column::Text(colors))?
            .with_column("x", Column::FloatList(xs))?
            .with_column("y", Column::FloatList(ys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_distr::Normal as SampleNormal;
    use crate::analysis::fixtures::{carriers, flight, store};
    use crate::state::selection::DelayRange;

    fn normal_sample(mean: f64, std_dev: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = SampleNormal::new(mean, std_dev).unwrap();
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn test_hundred_points_per_carrier() {
        let mut records = Vec::new();
        for (carrier, seed) in [("Delta", 1), ("United", 2)] {
            for delay in normal_sample(5.0, 30.0, 300, seed) {
                records.push(flight(carrier, "JFK", "ATL", delay));
            }
        }
        let store = store(records);
        let selection = DensitySelection {
            carriers: carriers(&["Delta", "United"]),
            range: DelayRange::new(-60.0, 120.0),
            bandwidth: Bandwidth::Scott,
        };

        let table = DensityDerivation::default().compute(&store, &selection).unwrap();
        assert_eq!(table.num_rows(), 2);
        for row in 0..2 {
            let x = &table.float_lists("x").unwrap()[row];
            let y = &table.float_lists("y").unwrap()[row];
            assert_eq!(x.len(), DENSITY_POINTS);
            assert_eq!(y.len(), DENSITY_POINTS);
            assert_eq!(x[0], -60.0);
            assert_eq!(x[DENSITY_POINTS - 1], 120.0);
            assert!(y.iter().all(|v| *v >= 0.0 && v.is_finite()));
        }
    }

    #[test]
    fn test_sparse_carrier_is_omitted() {
        let store = store(vec![
            flight("Delta", "JFK", "ATL", 5.0),
            flight("Delta", "JFK", "ATL", 300.0),
            flight("United", "EWR", "ORD", 1.0),
            flight("United", "EWR", "ORD", 12.0),
            flight("United", "EWR", "ORD", -7.0),
        ]);
        let selection = DensitySelection {
            carriers: carriers(&["Delta", "United"]),
            range: DelayRange::new(-60.0, 120.0),
            bandwidth: Bandwidth::Factor(0.5),
        };

        let table = DensityDerivation::default().compute(&store, &selection).unwrap();
        assert_eq!(table.text("label").unwrap(), &["United".to_string()]);
    }

    #[test]
    fn test_constant_sample_is_insufficient() {
        let err = GaussianKde::fit(vec![3.0, 3.0, 3.0], Bandwidth::Scott).unwrap_err();
        assert_eq!(err, DerivationError::InsufficientData(3));
    }

    #[test]
    fn test_rejects_non_positive_bandwidth() {
        let store = store(vec![flight("Delta", "JFK", "ATL", 5.0)]);
        let selection = DensitySelection {
            carriers: carriers(&["Delta"]),
            range: DelayRange::new(-60.0, 120.0),
            bandwidth: Bandwidth::Factor(0.0),
        };
        assert!(matches!(
            DensityDerivation::default().compute(&store, &selection),
            Err(DerivationError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let kde = GaussianKde::fit(normal_sample(0.0, 10.0, 500, 9), Bandwidth::Scott).unwrap();
        let grid = linspace(-100.0, 100.0, 2001);
        let step = grid[1] - grid[0];
        let area: f64 = grid.iter().map(|&x| kde.pdf(x) * step).sum();
        assert!((area - 1.0).abs() < 1e-3, "area was {}", area);
    }

    #[test]
    fn test_bandwidth_rules() {
        let sample = normal_sample(0.0, 10.0, 256, 4);
        let scott = GaussianKde::fit(sample.clone(), Bandwidth::Scott).unwrap();
        let silverman = GaussianKde::fit(sample.clone(), Bandwidth::Silverman).unwrap();
        let fixed = GaussianKde::fit(sample.clone(), Bandwidth::Factor(1.0)).unwrap();

        assert!(silverman.kernel_sigma() > scott.kernel_sigma());
        assert!((Bandwidth::Scott.factor(32) - 0.5).abs() < 1e-12);
        assert!((fixed.kernel_sigma() - sample.iter().std_dev()).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
