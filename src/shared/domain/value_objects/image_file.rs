use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::shared::errors::ValidationError;

const PATH_PREFIX: &str = "/images/";
const BLOB_KEY_PREFIX: &str = "images/";

/// Reference to an image held in the blob store.
///
/// Serialized as its public path, `/images/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageFile {
    id: Uuid,
}

impl ImageFile {
    /// Reference a freshly generated image id.
    pub fn generate() -> Self {
        Self { id: Uuid::now_v7() }
    }

    pub fn from_id(id: Uuid) -> Self {
        Self { id }
    }

    /// Accepts a bare id, the `/images/{id}` path, or any URL ending in that path.
    pub fn parse_reference(reference: &str) -> Result<Self, ValidationError> {
        let trimmed = reference.trim().trim_end_matches('/');
        let raw_id = match trimmed.rfind(PATH_PREFIX) {
            Some(pos) => &trimmed[pos + PATH_PREFIX.len()..],
            None => trimmed,
        };

        Uuid::parse_str(raw_id)
            .map(Self::from_id)
            .map_err(|_| ValidationError::InvalidImageReference(reference.to_string()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> String {
        format!("{}{}", PATH_PREFIX, self.id)
    }

    /// Object key under which the bytes live in the blob store.
    pub fn blob_key(&self) -> String {
        format!("{}{}", BLOB_KEY_PREFIX, self.id)
    }
}

impl TryFrom<String> for ImageFile {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_reference(&value)
    }
}

impl From<ImageFile> for String {
    fn from(value: ImageFile) -> Self {
        value.path()
    }
}

impl fmt::Display for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PATH_PREFIX, self.id)
    }
}
