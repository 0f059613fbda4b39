mod review;

pub use review::{Review, ReviewDetails, MAX_CONTENT_LENGTH, MAX_IMAGES};
