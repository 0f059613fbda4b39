pub mod app_error;
pub mod validation_error;

pub use app_error::{AppError, AppResult};
pub use validation_error::ValidationError;
