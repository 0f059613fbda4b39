pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::ShopService;
pub use domain::{entities::Shop, repositories::ShopRepository};
pub use infrastructure::ShopRepositoryImpl;
