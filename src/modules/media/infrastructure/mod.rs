pub mod persistence;
pub mod storage;

pub use persistence::ImageUsageRepositoryImpl;
pub use storage::ObjectStoreBlobStore;
