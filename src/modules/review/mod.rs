pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::ReviewService;
pub use domain::{entities::Review, repositories::ReviewRepository};
pub use infrastructure::ReviewRepositoryImpl;
