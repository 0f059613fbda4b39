mod rating;

pub use rating::{Rating, MAX_RATING, MIN_RATING};
