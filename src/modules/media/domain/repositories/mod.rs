mod blob_store;
mod image_usage_repository;

#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, StoredBlob};
#[cfg(test)]
pub use image_usage_repository::MockImageUsageRepository;
pub use image_usage_repository::ImageUsageRepository;
