// src/file/geography.rs
use super::FileHandler;
use crate::config::RegionsFile;
use std::path::Path;
use std::fs;
use anyhow::{Result, Context, anyhow};

#[derive(Debug)]
pub struct GeographyFileHandler;

impl GeographyFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<RegionsFile> for GeographyFileHandler {
    fn load(&self, path: &Path) -> Result<RegionsFile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read geography file: {}", path.display()))?;
        let regions: RegionsFile = ron::from_str(&content)
            .with_context(|| format!("Failed to parse geography file: {}", path.display()))?;

        for region in &regions.regions {
            if region.lons.len() != region.lats.len() {
                return Err(anyhow!(
                    "Region {} has {} longitudes but {} latitudes",
                    region.code, region.lons.len(), region.lats.len()
                ));
            }
        }

        Ok(regions)
    }

    fn save(&self, data: &RegionsFile, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(3)
        )?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Region;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.ron");
        let file = RegionsFile {
            version: "1.0.0".to_string(),
            regions: vec![Region {
                code: "CT".to_string(),
                name: "Connecticut".to_string(),
                lons: vec![-73.5, -71.8, -71.8, -73.7],
                lats: vec![42.0, 42.0, 41.3, 41.1],
            }],
        };

        let handler = GeographyFileHandler::new();
        handler.save(&file, &path).unwrap();
        assert_eq!(handler.load(&path).unwrap(), file);
    }

    #[test]
    fn test_bundled_outline_loads_from_default_path() {
        let settings = crate::config::DashboardSettings::default();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(&settings.geography_path);

        let regions = GeographyFileHandler::new().load(&path).unwrap();
        let visible: Vec<_> = regions.visible_regions(&settings.excluded_regions).collect();
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|r| r.lons.len() >= 3));
    }

    #[test]
    fn test_ragged_polygon_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.ron");
        fs::write(&path, r#"(
            version: "1.0.0",
            regions: [(code: "RI", name: "Rhode Island", lons: [-71.8, -71.1], lats: [42.0])],
        )"#).unwrap();

        assert!(GeographyFileHandler::new().load(&path).is_err());
    }
}
