use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::ValidationError;

const MAX_LENGTH: usize = 255;

/// Kept exactly as given, without trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationName(String);

impl StationName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.chars().count() > MAX_LENGTH {
            return Err(ValidationError::InvalidStationName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StationName> for String {
    fn from(value: StationName) -> Self {
        value.0
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_name_as_given() {
        assert_eq!(StationName::new("  Shibuya ").unwrap().as_str(), "  Shibuya ");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(StationName::new(""), Err(ValidationError::InvalidStationName));
    }

    #[test]
    fn test_rejects_overlong() {
        assert!(StationName::new("駅".repeat(255)).is_ok());
        assert!(StationName::new("駅".repeat(256)).is_err());
    }
}
