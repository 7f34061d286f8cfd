use thiserror::Error;

/// Errors produced by value construction and wire decoding.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("latitude {0} out of range [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} out of range [-180, 180]")]
    InvalidLongitude(f64),

    #[error("unknown value type: {0}")]
    UnknownType(String),

    #[error("malformed {kind} value: {reason}")]
    Malformed { kind: &'static str, reason: String },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
}

pub type TypeResult<T> = Result<T, TypeError>;
