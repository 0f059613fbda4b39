use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::ValidationError;

const MAX_LENGTH: usize = 255;

/// Identifier of an authenticated user, as supplied by the upstream proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() || value.chars().count() > MAX_LENGTH {
            return Err(ValidationError::InvalidUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_non_empty() {
        let user = UserId::new("alice").unwrap();
        assert_eq!(user.as_str(), "alice");
        assert_eq!(user.to_string(), "alice");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert_eq!(UserId::new(""), Err(ValidationError::InvalidUserId));
        assert_eq!(UserId::new("   "), Err(ValidationError::InvalidUserId));
        assert_eq!(UserId::new("u".repeat(256)), Err(ValidationError::InvalidUserId));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: UserId = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(ok.as_str(), "bob");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
