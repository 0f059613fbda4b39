/// Shared application layer patterns
pub mod pagination;

pub use pagination::{PageRequest, PaginationParams, DEFAULT_LIMIT, MAX_LIMIT};
