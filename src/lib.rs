// Group vacation finder: cheapest set of direct flights for travelers from
// different cities to meet at one destination on the same day

pub mod catalog;
pub mod cities;
pub mod combination;
pub mod config;
pub mod flight;
pub mod generator;
pub mod report;
pub mod vacation;

// Re-export key types for convenience
pub use catalog::{CatalogError, FlightCatalog, FlightRow};
pub use combination::{CombinationSearch, SearchError};
pub use config::FinderConfig;
pub use flight::{Candidates, CombinationResult, FlightRecord, Leg, VacationOption};
pub use vacation::VacationFinder;
