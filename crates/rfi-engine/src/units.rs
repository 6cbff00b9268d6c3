//! dB ↔ linear conversion and power summation.
//!
//! Powers from independent emitters add in watts, never in dB. Every
//! aggregate in the engine goes through [`sum_db`].

/// Aggregate result reported when the linear sum is effectively zero.
pub const FLOOR_DBW: f64 = -300.0;

/// Linear sums at or below this are clamped to [`FLOOR_DBW`].
pub const LINEAR_FLOOR: f64 = 1e-30;

#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

/// Sum dB quantities in the linear domain and convert back once.
///
/// Returns [`FLOOR_DBW`] for an empty input or a sum ≤ [`LINEAR_FLOOR`].
pub fn sum_db<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let total: f64 = values.into_iter().map(db_to_linear).sum();
    if total <= LINEAR_FLOOR {
        FLOOR_DBW
    } else {
        linear_to_db(total)
    }
}
