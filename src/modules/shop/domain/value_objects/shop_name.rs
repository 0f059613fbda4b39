use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::ValidationError;

const MAX_LENGTH: usize = 255;

/// Kept exactly as given, without trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShopName(String);

impl ShopName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.chars().count() > MAX_LENGTH {
            return Err(ValidationError::InvalidShopName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShopName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShopName> for String {
    fn from(value: ShopName) -> Self {
        value.0
    }
}

impl fmt::Display for ShopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_name() {
        assert_eq!(ShopName::new("Cafe A").unwrap().as_str(), "Cafe A");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(ShopName::new(""), Err(ValidationError::InvalidShopName));
    }

    #[test]
    fn test_keeps_name_as_given() {
        assert_eq!(ShopName::new(" Cafe A ").unwrap().as_str(), " Cafe A ");
        assert_eq!(ShopName::new("   ").unwrap().as_str(), "   ");
    }

    #[test]
    fn test_error_is_named() {
        let err = ShopName::new("").unwrap_err();
        assert!(err.to_string().starts_with("invalid ShopName"));
    }
}
