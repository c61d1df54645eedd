// src/state/store.rs
use std::collections::BTreeSet;
use std::sync::Arc;
use crate::config::FlightRecord;

/// Read-only snapshot of every flight record, shared by all tabs.
#[derive(Debug, Clone)]
pub struct FlightStore {
    records: Arc<[FlightRecord]>,
    carriers: Arc<[String]>,
}

impl FlightStore {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        let carriers: BTreeSet<String> = records.iter()
            .map(|r| r.carrier_name.clone())
            .collect();

        Self {
            records: records.into(),
            carriers: carriers.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct carrier names, sorted alphabetically.
    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    /// Position of a carrier in the sorted carrier list.
    pub fn carrier_position(&self, name: &str) -> Option<usize> {
        self.carriers.binary_search_by(|c| c.as_str().cmp(name)).ok()
    }

    pub fn for_carrier<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FlightRecord> + 'a {
        self.records.iter().filter(move |r| r.carrier_name == name)
    }

    pub fn origins(&self) -> Vec<String> {
        Self::distinct(self.records.iter().map(|r| r.origin.as_str()))
    }

    pub fn destinations(&self) -> Vec<String> {
        Self::distinct(self.records.iter().map(|r| r.destination.as_str()))
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        values.collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
