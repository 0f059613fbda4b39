pub mod repositories;

pub use repositories::{BlobStore, ImageUsageRepository, StoredBlob};
