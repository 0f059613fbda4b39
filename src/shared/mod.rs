// Shared kernel used by every bounded context

pub mod application; // Pagination
pub mod domain; // Shared value objects and clock
pub mod errors; // Error types
pub mod infrastructure; // Config, database, identity
pub mod utils; // Logging and validation helpers

pub use infrastructure::database::Database;
