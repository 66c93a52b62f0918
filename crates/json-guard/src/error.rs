//! Error type shared by every encode, decode and adapter operation.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Boxed error returned by [`Validator`](crate::Validator) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The decoder exhausted its byte budget before a value was parsed.
    #[error("request was too large (max: {limit} bytes)")]
    TooLarge { limit: u64 },
    /// The input was not well-formed JSON, or did not fit the target type.
    #[error("{0}")]
    InvalidJson(#[source] serde_json::Error),
    /// A [`Validator`](crate::Validator) rejected the value.
    #[error(transparent)]
    Validation(BoxError),
    /// A database scan received a value of the wrong type.
    #[error("invalid type: {actual} (wanted {expected})")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// The value could not be serialized.
    #[error("marshal failed: {0}")]
    Marshal(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),
}

impl Error {
    /// Returns the rejection produced by a validator, if this is one.
    pub fn as_validation(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Validation(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// True when a decoder ran out of byte budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_guard::{Decoder, JsonObject};
    ///
    /// let mut dec = Decoder::with_limit(&br#"{"key": "value"}"#[..], 8);
    /// assert!(dec.decode::<JsonObject>().unwrap_err().is_too_large());
    /// ```
    pub fn is_too_large(&self) -> bool {
        matches!(self, Error::TooLarge { .. })
    }

    /// True for malformed input, or input that does not fit the target type.
    pub fn is_invalid_json(&self) -> bool {
        matches!(self, Error::InvalidJson(_))
    }
}
