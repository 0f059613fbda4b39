pub mod dto;
pub mod service;

pub use dto::{RecentReviewsParams, ReviewInput};
pub use service::ReviewService;
