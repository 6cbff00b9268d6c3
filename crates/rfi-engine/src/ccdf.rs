//! Empirical complementary CDF of a sample set.

use serde::Serialize;

use rfi_common::error;
use rfi_common::ValidationError;

use crate::samples::SampleSet;

pub const DEFAULT_CCDF_POINTS: usize = 200;

/// `fraction[i] = P(sample > x[i])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ccdf {
    pub x: Vec<f64>,
    pub fraction: Vec<f64>,
}

/// Evaluate the CCDF at `num_points` evenly spaced points spanning
/// `[min, max]` of the samples, both ends included.
pub fn estimate(samples: &SampleSet, num_points: usize) -> Result<Ccdf, ValidationError> {
    error::nonzero_count("ccdf_points", num_points)?;

    let mut sorted = samples.as_slice().to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;

    let x = linspace(samples.min(), samples.max(), num_points);
    let fraction = x
        .iter()
        .map(|&xi| {
            let at_or_below = sorted.partition_point(|&s| s <= xi);
            (sorted.len() - at_or_below) as f64 / n
        })
        .collect();

    Ok(Ccdf { x, fraction })
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
    // Pin the last point so the top of the range is evaluated exactly.
    out[num - 1] = stop;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_length() {
        let s = SampleSet::new((1..=100).map(f64::from).collect()).unwrap();
        let c = estimate(&s, DEFAULT_CCDF_POINTS).unwrap();
        assert_eq!(c.x.len(), DEFAULT_CCDF_POINTS);
        assert_eq!(c.fraction.len(), DEFAULT_CCDF_POINTS);
        assert_eq!(c.x[0], 1.0);
        assert_eq!(*c.x.last().unwrap(), 100.0);
        assert!((c.fraction[0] - 0.99).abs() < 1e-12);
        assert_eq!(*c.fraction.last().unwrap(), 0.0);
    }

    #[test]
    fn ties_are_excluded() {
        let s = SampleSet::new(vec![0.0, 1.0, 1.0, 1.0, 2.0]).unwrap();
        let c = estimate(&s, 3).unwrap();
        assert_eq!(c.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(c.fraction, vec![0.8, 0.2, 0.0]);
    }

    #[test]
    fn constant_samples() {
        let s = SampleSet::new(vec![3.0; 10]).unwrap();
        let c = estimate(&s, 5).unwrap();
        assert!(c.x.iter().all(|&x| x == 3.0));
        assert!(c.fraction.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn single_point() {
        let s = SampleSet::new(vec![1.0, 2.0]).unwrap();
        let c = estimate(&s, 1).unwrap();
        assert_eq!(c.x, vec![1.0]);
        assert_eq!(c.fraction, vec![0.5]);
    }

    #[test]
    fn zero_points_rejected() {
        let s = SampleSet::new(vec![1.0]).unwrap();
        assert!(estimate(&s, 0).is_err());
    }
}
