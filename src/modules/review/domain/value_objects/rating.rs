use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::ValidationError;

pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 3;

/// A review score from 0 to 3 inclusive. Serialized as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(ValidationError::InvalidRating(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_every_score_in_range() {
        for value in 0..=3 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(Rating::new(-1), Err(ValidationError::InvalidRating(-1)));
        assert_eq!(Rating::new(4), Err(ValidationError::InvalidRating(4)));
    }

    #[test]
    fn test_serde_uses_integer() {
        let rating: Rating = serde_json::from_str("2").unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "2");
        assert!(serde_json::from_str::<Rating>("5").is_err());
    }
}
