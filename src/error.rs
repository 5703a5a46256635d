//! Error taxonomy for a single aggregation run.
//!
//! Only `MalformedEntry` is recovered locally (the level is skipped). Everything
//! else ends the run.

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::engine::types::Side;

/// Why one level inside an otherwise usable payload was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedEntry {
    #[error("entry has unexpected shape: {0}")]
    Shape(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a decimal: {value}")]
    NotDecimal { field: &'static str, value: String },
    #[error("field `{field}` is negative: {value}")]
    Negative { field: &'static str, value: String },
    #[error("field `{field}` is zero")]
    Zero { field: &'static str },
    #[error("level {price} x {quantity} is outside the decimal range")]
    OutOfRange { price: String, quantity: String },
}

/// Payload-level failure: the venue's response cannot yield a book at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceFormatError {
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("payload has no `{0}` array")]
    MissingSide(&'static str),
    #[error("no valid levels survived ({skipped} malformed entries skipped)")]
    NoValidLevels { skipped: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    #[error("rate limited, next call allowed in {retry_in:?}")]
    RateLimited { retry_in: Duration },
    #[error("network failure: {0}")]
    Network(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("bad payload: {0}")]
    Format(#[from] SourceFormatError),
}

/// A venue could not supply a book this run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("source `{venue}` unavailable: {reason}")]
pub struct SourceUnavailable {
    pub venue: String,
    pub reason: UnavailableReason,
}

impl SourceUnavailable {
    pub fn new(venue: impl Into<String>, reason: impl Into<UnavailableReason>) -> Self {
        Self { venue: venue.into(), reason: reason.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("quantity `{0}` is not a decimal number")]
    Unparsable(String),
    #[error("quantity must be positive, got {0}")]
    NotPositive(String),
}

/// The walk's running total left the exact decimal range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{side} total overflows after filling {filled} across {levels_consumed} levels")]
pub struct ExecutionOverflow {
    pub side: Side,
    pub filled: Decimal,
    pub levels_consumed: usize,
}

#[derive(Error, Debug)]
pub enum AggError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    SourceUnavailable(#[from] SourceUnavailable),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Execution(#[from] ExecutionOverflow),
}

impl From<::config::ConfigError> for AggError {
    fn from(e: ::config::ConfigError) -> Self {
        AggError::Config(e.to_string())
    }
}

impl AggError {
    /// Process exit status for this failure. Success is 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            AggError::InvalidInput(_) => 2,
            AggError::SourceUnavailable(_) => 3,
            AggError::Config(_) => 4,
            AggError::Execution(_) => 5,
        }
    }
}

pub type AggResult<T> = Result<T, AggError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let input: AggError = InvalidInput::NotPositive("0".into()).into();
        let source: AggError = SourceUnavailable::new(
            "gemini",
            UnavailableReason::Timeout(Duration::from_secs(5)),
        )
        .into();
        let config = AggError::Config("no venues".into());
        let overflow: AggError =
            ExecutionOverflow { side: Side::BUY, filled: Decimal::ONE, levels_consumed: 1 }.into();
        assert_eq!(input.exit_code(), 2);
        assert_eq!(source.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(overflow.exit_code(), 5);
    }

    #[test]
    fn test_source_unavailable_message_names_venue() {
        let err = SourceUnavailable::new("coinbase", SourceFormatError::MissingSide("asks"));
        assert_eq!(
            err.to_string(),
            "source `coinbase` unavailable: bad payload: payload has no `asks` array"
        );
    }
}
