// src/file/export.rs
use std::io;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use csv::Writer;
use tracing::info;
use crate::analysis::DerivedTable;

/// Writes derived tables out as CSV. Side tables are not included.
#[derive(Debug)]
pub struct TableExporter {
    export_dir: Option<PathBuf>,
}

impl TableExporter {
    pub fn new(export_dir: Option<PathBuf>) -> Self {
        Self { export_dir }
    }

    pub fn export_dir(&self) -> Option<&Path> {
        self.export_dir.as_deref()
    }

    pub fn default_file_name(table: &DerivedTable) -> String {
        format!("{}.csv", table.name())
    }

    pub fn write<W: io::Write>(table: &DerivedTable, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        writer.write_record(table.column_names())?;

        for row in 0..table.num_rows() {
            let record: Vec<String> = table.columns().iter()
                .map(|(_, column)| column.cell(row).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, table: &DerivedTable, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        Self::write(table, file)
            .with_context(|| format!("Failed to export {} table", table.name()))?;
        info!(table = table.name(), rows = table.num_rows(), path = %path.display(), "exported table");
        Ok(())
    }
}
