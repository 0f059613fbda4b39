/// Infrastructure shared across the bounded contexts.
pub mod config;
pub mod database;
pub mod identity;

pub use config::AppConfig;
pub use database::{run_in_transaction, Database};
pub use identity::CurrentUser;
