// src/config/geography.rs
use serde::{Serialize, Deserialize};

/// Boundary polygon of one region (a US state in the bundled data).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionsFile {
    pub version: String,
    pub regions: Vec<Region>,
}

impl RegionsFile {
    pub fn new() -> Self {
        Self {
            version: "1.0.0".to_string(),
            regions: Vec::new(),
        }
    }

    /// Regions left on the base map once `excluded` codes are removed.
    pub fn visible_regions<'a>(&'a self, excluded: &'a [String]) -> impl Iterator<Item = &'a Region> + 'a {
        self.regions.iter()
            .filter(move |region| !excluded.iter().any(|code| code.eq_ignore_ascii_case(&region.code)))
    }
}

impl Default for RegionsFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(code: &str) -> Region {
        Region {
            code: code.to_string(),
            name: code.to_string(),
            lons: vec![0.0, 1.0, 1.0],
            lats: vec![0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn test_excluded_regions_are_hidden() {
        let file = RegionsFile {
            version: "1.0.0".to_string(),
            regions: vec![region("NY"), region("AK"), region("HI"), region("FL")],
        };
        let excluded = vec!["AK".to_string(), "hi".to_string()];
        let codes: Vec<&str> = file.visible_regions(&excluded).map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["NY", "FL"]);
    }
}
