// src/file/flights.rs
use super::FileHandler;
use crate::config::{FlightRecord, FlightRow};
use std::path::Path;
use anyhow::{Result, Context};
use csv::{ReaderBuilder, Writer};
use tracing::{info, warn};

/// Reads and writes the flight-records CSV.
#[derive(Debug)]
pub struct FlightsFileHandler;

impl FlightsFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<Vec<FlightRecord>> for FlightsFileHandler {
    fn load(&self, path: &Path) -> Result<Vec<FlightRecord>> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open flight records: {}", path.display()))?;

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in reader.deserialize::<FlightRow>().enumerate() {
            // Header is line 1
            let row = row.with_context(|| format!(
                "Malformed flight record on line {} of {}", index + 2, path.display()
            ))?;

            match row.into_record() {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, path = %path.display(), "skipped flight rows with missing values");
        }
        info!(records = records.len(), path = %path.display(), "loaded flight records");

        Ok(records)
    }

    fn save(&self, data: &Vec<FlightRecord>, path: &Path) -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        for record in data {
            writer.serialize(FlightRow::from(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}
