// src/config/mod.rs
pub mod flight;
pub mod geography;
pub mod settings;

// Re-export commonly used types
pub use flight::{FlightRecord, FlightRow};
pub use geography::{Region, RegionsFile};
pub use settings::DashboardSettings;
