use thiserror::Error;

/// Named failures raised by the validating constructors of the domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid Rating: {0} (expected 0-3)")]
    InvalidRating(i32),

    #[error("invalid PostCode: '{0}' (expected NNN-NNNN)")]
    InvalidPostCode(String),

    #[error("invalid UserID: must be 1-255 characters")]
    InvalidUserId,

    #[error("invalid ShopName: must be 1-255 characters")]
    InvalidShopName,

    #[error("invalid StationName: must be 1-255 characters")]
    InvalidStationName,

    #[error("invalid payment method: '{0}'")]
    InvalidPaymentMethod(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("review content too long: {length} characters (max {max})")]
    ContentTooLong { length: usize, max: usize },

    #[error("too many images: {count} (max {max})")]
    TooManyImages { count: usize, max: usize },

    #[error("invalid image reference: '{0}'")]
    InvalidImageReference(String),
}
