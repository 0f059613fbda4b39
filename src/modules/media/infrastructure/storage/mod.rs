mod object_store_blob_store;

pub use object_store_blob_store::{ObjectStoreBlobStore, DEFAULT_CONTENT_TYPE};
