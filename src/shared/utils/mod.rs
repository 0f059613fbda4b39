pub mod collections;
pub mod logger;
pub mod validation;
