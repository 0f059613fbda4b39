// Bounded contexts
pub mod media;
pub mod review;
pub mod shop;
pub mod station;
