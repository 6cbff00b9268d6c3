//! Validation error taxonomy.
//!
//! Every malformed input is rejected with a [`ValidationError`] before any
//! computation runs. Numeric degeneracies inside the engine are clamped
//! instead, and unknown configuration keys surface as sentinel values, so
//! this is the only error a well-formed caller can receive.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("at least one interferer is required")]
    EmptyInterferers,
    #[error("{field} must be greater than zero")]
    ZeroCount { field: &'static str },
    #[error("interferer distance reaches {distance_km} km at t = {time_s} s")]
    NonPositiveRange { time_s: f64, distance_km: f64 },
    #[error("{quantity} overflows: interference power too large to represent")]
    Overflow { quantity: &'static str },
}

pub fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

/// Strictly positive and finite. Guards every `log10` argument.
pub fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::Negative { field, value })
    }
}

pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Reject a computed quantity that left the finite double range.
pub fn representable(quantity: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::Overflow { quantity })
    }
}

pub fn nonzero_count(field: &'static str, count: usize) -> Result<usize, ValidationError> {
    if count == 0 {
        Err(ValidationError::ZeroCount { field })
    } else {
        Ok(count)
    }
}
