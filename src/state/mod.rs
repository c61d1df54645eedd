// src/state/mod.rs
pub mod store;
pub mod selection;
pub mod controller;

pub use store::FlightStore;
pub use selection::{DelayRange, DensitySelection, HistogramSelection, MapSelection, RouteSelection};
pub use controller::{Dashboard, DashboardEvent, Presenter};
