mod review_repository;

#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewQuery, ReviewRepository};
