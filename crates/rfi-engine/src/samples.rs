//! SNR-loss sample sets and their exceedance statistics.

use serde::Serialize;

use rfi_common::error;
use rfi_common::ValidationError;

/// Ordered, non-empty sequence of SNR-loss values in dB.
///
/// Index order matches draw (or time) order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSet(Vec<f64>);

impl SampleSet {
    pub fn new(values: Vec<f64>) -> Result<Self, ValidationError> {
        error::nonzero_count("samples", values.len())?;
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// False for every constructed set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Number of samples strictly greater than `threshold`.
    pub fn count_above(&self, threshold: f64) -> usize {
        self.0.iter().filter(|&&v| v > threshold).count()
    }

    /// Percentage of samples strictly greater than `threshold`, unrounded.
    pub fn exceedance_pct(&self, threshold: f64) -> f64 {
        self.count_above(threshold) as f64 / self.0.len() as f64 * 100.0
    }

    pub fn min(&self) -> f64 {
        self.iter().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.iter().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean(&self) -> f64 {
        self.iter().sum::<f64>() / self.0.len() as f64
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let var = self.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / self.0.len() as f64;
        var.sqrt()
    }
}
