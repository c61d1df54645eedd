// src/file/mod.rs
use anyhow::{Result, Context, anyhow};
use std::path::{Path, PathBuf};
use tracing::info;
use crate::config::{DashboardSettings, FlightRecord, RegionsFile};
use crate::state::FlightStore;

pub mod flights;
pub mod geography;
pub mod export;

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

/// Loads the dashboard's read-only inputs. Any failure here is fatal.
#[derive(Debug)]
pub struct FileManager {
    flights_path: PathBuf,
    geography_path: PathBuf,
    flights_handler: flights::FlightsFileHandler,
    geography_handler: geography::GeographyFileHandler,
}

impl FileManager {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            flights_path: settings.flights_path.clone(),
            geography_path: settings.geography_path.clone(),
            flights_handler: flights::FlightsFileHandler::new(),
            geography_handler: geography::GeographyFileHandler::new(),
        }
    }

    pub fn load_flights(&self) -> Result<Vec<FlightRecord>> {
        if !self.flights_path.exists() {
            return Err(anyhow!("Flight data file not found: {}", self.flights_path.display()));
        }

        let records = self.flights_handler.load(&self.flights_path)?;
        if records.is_empty() {
            return Err(anyhow!("No usable flight records in {}", self.flights_path.display()));
        }
        Ok(records)
    }

    pub fn load_geography(&self) -> Result<RegionsFile> {
        if !self.geography_path.exists() {
            return Err(anyhow!("Geography file not found: {}", self.geography_path.display()));
        }
        self.geography_handler.load(&self.geography_path)
    }

    pub fn load_inputs(&self) -> Result<(FlightStore, RegionsFile)> {
        let records = self.load_flights().context("Failed to load flight records")?;
        let geography = self.load_geography().context("Failed to load region boundaries")?;

        let store = FlightStore::new(records);
        info!(
            records = store.len(),
            carriers = store.carriers().len(),
            regions = geography.regions.len(),
            "inputs loaded"
        );
        Ok((store, geography))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::flight;
    use crate::config::Region;

    fn settings_in(dir: &Path) -> DashboardSettings {
        DashboardSettings {
            flights_path: dir.join("flights.csv"),
            geography_path: dir.join("states.ron"),
            ..DashboardSettings::default()
        }
    }

    #[test]
    fn test_load_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        flights::FlightsFileHandler::new()
            .save(&vec![flight("Delta", "JFK", "ATL", 1.0)], &settings.flights_path)
            .unwrap();
        geography::GeographyFileHandler::new()
            .save(&RegionsFile {
                version: "1.0.0".to_string(),
                regions: vec![Region {
                    code: "NY".to_string(),
                    name: "New York".to_string(),
                    lons: vec![-79.7, -73.3],
                    lats: vec![42.0, 40.5],
                }],
            }, &settings.geography_path)
            .unwrap();

        let (store, geography) = FileManager::new(&settings).load_inputs().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(geography.regions[0].code, "NY");
    }

    #[test]
    fn test_missing_flights_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileManager::new(&settings_in(dir.path())).load_inputs().unwrap_err();
        assert!(format!("{:#}", err).contains("Flight data file not found"));
    }
}
