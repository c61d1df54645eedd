// src/config/settings.rs
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use config::{Config, Environment, File};
use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::analysis::histogram::bin_count;
use crate::state::DelayRange;

/// Environment variable naming an explicit settings file.
pub const SETTINGS_ENV: &str = "FLIGHTS_CONFIG";
pub const SETTINGS_FILE: &str = "dashboard.ron";
const ENV_PREFIX: &str = "FLIGHTS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub flights_path: PathBuf,
    pub geography_path: PathBuf,
    pub excluded_regions: Vec<String>,
    pub export_dir: Option<PathBuf>,
    /// How many carriers (alphabetically first) start out selected.
    pub initial_carriers: usize,
    pub histogram: HistogramDefaults,
    pub density: DensityDefaults,
    pub routes: RouteDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistogramDefaults {
    pub range_start: f64,
    pub range_end: f64,
    pub bin_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DensityDefaults {
    pub range_start: f64,
    pub range_end: f64,
    pub bandwidth: Option<f64>,  // None selects the automatic rule
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteDefaults {
    pub origin: String,
    pub destination: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            flights_path: PathBuf::from("data/flights.csv"),
            geography_path: PathBuf::from("data/us_states.ron"),
            excluded_regions: vec!["AK".to_string(), "HI".to_string()],
            export_dir: None,
            initial_carriers: 2,
            histogram: HistogramDefaults::default(),
            density: DensityDefaults::default(),
            routes: RouteDefaults::default(),
        }
    }
}

impl Default for HistogramDefaults {
    fn default() -> Self {
        Self {
            range_start: -60.0,
            range_end: 120.0,
            bin_width: 5.0,
        }
    }
}

impl Default for DensityDefaults {
    fn default() -> Self {
        Self {
            range_start: -60.0,
            range_end: 120.0,
            bandwidth: None,
        }
    }
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            origin: "JFK".to_string(),
            destination: "MIA".to_string(),
        }
    }
}

impl DashboardSettings {
    /// Loads settings from the discovered settings file (if any) layered
    /// under `FLIGHTS_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::settings_path().as_deref())
    }

    /// `FLIGHTS_CONFIG` wins; otherwise the user config dir, then the
    /// working directory. Returns `None` when no settings file exists.
    pub fn settings_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }

        let user_path = dirs::config_dir()
            .map(|dir| dir.join("flight-delays").join(SETTINGS_FILE));
        if let Some(path) = user_path.filter(|p| p.exists()) {
            return Some(path);
        }

        let local = PathBuf::from(SETTINGS_FILE);
        local.exists().then_some(local)
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(anyhow!("Settings file not found: {}", path.display()));
            }
            debug!(path = %path.display(), "reading settings file");
            builder = builder.add_source(File::from(path));
        }

        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()
            .context("Failed to read dashboard settings")?
            .try_deserialize()
            .context("Failed to parse dashboard settings")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let hist = &self.histogram;
        if !(hist.range_start < hist.range_end) {
            return Err(anyhow!(
                "histogram range start ({}) must be below its end ({})",
                hist.range_start, hist.range_end
            ));
        }
        bin_count(&DelayRange::new(hist.range_start, hist.range_end), hist.bin_width)
            .map_err(|e| anyhow!("histogram.bin_width rejected: {}", e))?;

        let density = &self.density;
        if !(density.range_start < density.range_end) {
            return Err(anyhow!(
                "density range start ({}) must be below its end ({})",
                density.range_start, density.range_end
            ));
        }
        if let Some(bandwidth) = density.bandwidth {
            if !(bandwidth > 0.0) {
                return Err(anyhow!("density.bandwidth must be positive, got {}", bandwidth));
            }
        }

        Ok(())
    }
}
