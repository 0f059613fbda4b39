pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::MediaService;
pub use domain::{BlobStore, ImageUsageRepository};
pub use infrastructure::{ImageUsageRepositoryImpl, ObjectStoreBlobStore};
