use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::shared::errors::ValidationError;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{3}-[0-9]{4}$").expect("post code pattern compiles"))
}

/// Japanese postal code in `NNN-NNNN` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostCode(String);

impl PostCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !pattern().is_match(&value) {
            return Err(ValidationError::InvalidPostCode(value));
        }
        Ok(Self(value))
    }

    /// For optional fields: blank input means "no post code".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Self::new(trimmed).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostCode> for String {
    fn from(value: PostCode) -> Self {
        value.0
    }
}

impl fmt::Display for PostCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_hyphenated_form() {
        assert_eq!(PostCode::new("123-4567").unwrap().as_str(), "123-4567");
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["1234567", "abc-defg", "12-34567", "123-45678", " 123-4567", "１２３-４５６７"] {
            assert_eq!(
                PostCode::new(raw),
                Err(ValidationError::InvalidPostCode(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_only_allowed_as_optional() {
        assert!(PostCode::new("").is_err());
        assert_eq!(PostCode::parse_optional("").unwrap(), None);
        assert_eq!(PostCode::parse_optional("  ").unwrap(), None);
        assert_eq!(
            PostCode::parse_optional("150-0002").unwrap(),
            Some(PostCode::new("150-0002").unwrap())
        );
        assert!(PostCode::parse_optional("1500002").is_err());
    }
}
