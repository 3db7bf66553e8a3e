//! Error types for the Offer Engine.
//!
//! Every engine operation returns [`EngineError`] on failure.  None of
//! these conditions is fatal: callers may fall back to the neutral
//! values exposed by the result types (for example
//! [`TaxBreakdown::zeroed`](crate::tax::TaxBreakdown::zeroed)) so a
//! front end can always render something.

use crate::models::ValueDimension;
use thiserror::Error;

/// Errors produced while validating input or running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A monetary value was negative or a qualitative value fell outside
    /// its allowed range.
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    /// A dimension referenced by the evaluation has no importance score in
    /// the personal values profile.
    #[error("values profile has no score for {0}")]
    MissingProfileData(ValueDimension),
    /// Engine constants could not be parsed.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// An engine constants file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Rejects negative and non-finite monetary amounts.
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(())
}

/// Rejects values outside an inclusive range.
pub(crate) fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(EngineError::invalid(
            field,
            format!("must be between {min} and {max} (got {value})"),
        ));
    }
    Ok(())
}
