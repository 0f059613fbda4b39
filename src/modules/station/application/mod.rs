pub mod service;

pub use service::{StationInput, StationService};
