pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::StationService;
pub use domain::{entities::Station, repositories::StationRepository};
pub use infrastructure::StationRepositoryImpl;
