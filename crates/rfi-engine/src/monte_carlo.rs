//! # Monte Carlo SNR-loss sampling (ITU-R SA.1157 §4.2)
//!
//! Interference power is modelled as Gaussian in dB (log-normal in watts)
//! around the aggregate mean. A duty cycle below one silences a random
//! subset of samples by pinning them to the [`FLOOR_DBW`] sentinel.
//!
//! The random source is always supplied by the caller. Seeding it fixes
//! the whole sample set.

use rand::Rng;
use rand::RngExt;

use rfi_common::error;
use rfi_common::models::{DEFAULT_DUTY_CYCLE, Interferer};
use rfi_common::ValidationError;

use crate::link_budget::LinkBudget;
use crate::samples::SampleSet;
use crate::units::FLOOR_DBW;

/// Which interferer's statistics drive the ensemble.
///
/// Only the first entry is consulted; the spread and duty cycle of every
/// other interferer are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatisticsSource {
    #[default]
    FirstInterferer,
}

/// Log-normal interference ensemble parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloSampler {
    mean_dbw: f64,
    sigma_db: f64,
    duty_cycle: f64,
}

impl MonteCarloSampler {
    pub fn new(mean_dbw: f64, sigma_db: f64, duty_cycle: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            mean_dbw: error::finite("mean_dbw", mean_dbw)?,
            sigma_db: error::non_negative("sigma_db", sigma_db)?,
            duty_cycle: error::in_range("duty_cycle", duty_cycle, 0.0, 1.0)?,
        })
    }

    /// Sampler centred on `i_aggregate_dbw` with statistics taken from
    /// `interferers` according to `source`.
    pub fn for_scenario(
        i_aggregate_dbw: f64,
        interferers: &[Interferer],
        source: StatisticsSource,
    ) -> Result<Self, ValidationError> {
        let (sigma_db, duty_cycle) = match source {
            StatisticsSource::FirstInterferer => interferers
                .first()
                .map(|i| (i.sigma_db(), i.duty_cycle()))
                .ok_or(ValidationError::EmptyInterferers)?,
        };
        Self::new(i_aggregate_dbw, sigma_db, duty_cycle)
    }

    pub fn mean_dbw(&self) -> f64 {
        self.mean_dbw
    }

    pub fn sigma_db(&self) -> f64 {
        self.sigma_db
    }

    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    /// Draw `n` interference powers in dBW.
    ///
    /// All `n` Gaussian values are drawn first; with a duty cycle below
    /// one, `⌊n·duty⌋` indices chosen without replacement keep their draw
    /// and the rest are set to [`FLOOR_DBW`].
    pub fn interference_samples(
        &self,
        n: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<f64>, ValidationError> {
        error::nonzero_count("time_samples", n)?;

        let draws: Vec<f64> = (0..n)
            .map(|_| self.mean_dbw + self.sigma_db * standard_normal(rng))
            .collect();

        if self.duty_cycle >= DEFAULT_DUTY_CYCLE {
            return Ok(draws);
        }

        let num_on = (n as f64 * self.duty_cycle).floor() as usize;
        let mut out = vec![FLOOR_DBW; n];
        for idx in choose_indices(n, num_on, rng) {
            out[idx] = draws[idx];
        }
        Ok(out)
    }

    /// Draw `n` SNR-loss samples against `link`.
    pub fn snr_loss_samples(
        &self,
        link: &LinkBudget,
        n: usize,
        rng: &mut impl Rng,
    ) -> Result<SampleSet, ValidationError> {
        let losses = self
            .interference_samples(n, rng)?
            .into_iter()
            .map(|i_dbw| error::representable("snr_loss_db", link.snr_loss(i_dbw)))
            .collect::<Result<Vec<_>, _>>()?;
        SampleSet::new(losses)
    }
}

/// Box-Muller standard normal.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    // Shift to (0, 1] so ln never sees zero.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0_f64 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// `k` distinct indices from `0..n`, uniformly, via a partial Fisher-Yates.
fn choose_indices(n: usize, k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let k = k.min(n);
    let mut pool: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.random_range(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rfi_common::models::{BandParameters, NoiseParameters};
    use std::collections::HashSet;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn link() -> LinkBudget {
        let band = BandParameters::new(2.25, 35786.0, 26.0, 30.0, 2.0).unwrap();
        LinkBudget::compute(&band, &NoiseParameters::default(), 0.0)
    }

    // ─── Construction ───────────────────────────────────────────────────

    #[test]
    fn rejects_invalid_statistics() {
        assert!(MonteCarloSampler::new(-150.0, -1.0, 1.0).is_err());
        assert!(MonteCarloSampler::new(-150.0, 4.0, 1.1).is_err());
        assert!(MonteCarloSampler::new(f64::NAN, 4.0, 1.0).is_err());
    }

    #[test]
    fn zero_samples_rejected() {
        let s = MonteCarloSampler::new(-150.0, 4.0, 1.0).unwrap();
        assert!(s.interference_samples(0, &mut seeded_rng()).is_err());
    }

    #[test]
    fn first_interferer_supplies_statistics() {
        let list = [
            Interferer::with_statistics(40.0, 500.0, 5.0, 2.5, 0.4).unwrap(),
            Interferer::with_statistics(40.0, 500.0, 5.0, 9.0, 1.0).unwrap(),
        ];
        let s = MonteCarloSampler::for_scenario(-140.0, &list, StatisticsSource::FirstInterferer)
            .unwrap();
        assert_eq!(s.sigma_db(), 2.5);
        assert_eq!(s.duty_cycle(), 0.4);
        assert_eq!(s.mean_dbw(), -140.0);
    }

    #[test]
    fn for_scenario_requires_interferers() {
        assert_eq!(
            MonteCarloSampler::for_scenario(-140.0, &[], StatisticsSource::default()),
            Err(ValidationError::EmptyInterferers)
        );
    }

    // ─── Statistics ─────────────────────────────────────────────────────

    #[test]
    fn full_duty_matches_sigma() {
        let s = MonteCarloSampler::new(-140.0, 4.0, 1.0).unwrap();
        let draws = s.interference_samples(50_000, &mut seeded_rng()).unwrap();
        let set = SampleSet::new(draws).unwrap();
        assert!((set.mean() - -140.0).abs() < 0.1, "mean {}", set.mean());
        assert!((set.std_dev() - 4.0).abs() < 0.1, "std {}", set.std_dev());
    }

    #[test]
    fn duty_cycle_floors_the_rest() {
        let s = MonteCarloSampler::new(-140.0, 4.0, 0.3).unwrap();
        let n = 10_000;
        let draws = s.interference_samples(n, &mut seeded_rng()).unwrap();
        let floored = draws.iter().filter(|&&v| v == FLOOR_DBW).count();
        assert_eq!(floored, n - 3_000);
    }

    #[test]
    fn zero_duty_is_all_floor() {
        let s = MonteCarloSampler::new(-140.0, 4.0, 0.0).unwrap();
        let draws = s.interference_samples(100, &mut seeded_rng()).unwrap();
        assert!(draws.iter().all(|&v| v == FLOOR_DBW));
    }

    #[test]
    fn zero_sigma_is_constant() {
        let s = MonteCarloSampler::new(-140.0, 0.0, 1.0).unwrap();
        let draws = s.interference_samples(100, &mut seeded_rng()).unwrap();
        assert!(draws.iter().all(|&v| v == -140.0));
    }

    #[test]
    fn same_seed_same_samples() {
        let s = MonteCarloSampler::new(-140.0, 4.0, 0.5).unwrap();
        let a = s.snr_loss_samples(&link(), 1_000, &mut seeded_rng()).unwrap();
        let b = s.snr_loss_samples(&link(), 1_000, &mut seeded_rng()).unwrap();
        assert_eq!(a, b);
        let c = s
            .snr_loss_samples(&link(), 1_000, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn snr_loss_is_non_negative() {
        let s = MonteCarloSampler::new(-150.0, 6.0, 0.7).unwrap();
        let set = s.snr_loss_samples(&link(), 5_000, &mut seeded_rng()).unwrap();
        assert_eq!(set.len(), 5_000);
        assert!(set.iter().all(|v| v >= -1e-9));
    }

    #[test]
    fn unrepresentable_loss_is_rejected() {
        let s = MonteCarloSampler::new(1e6, 0.0, 1.0).unwrap();
        let err = s.snr_loss_samples(&link(), 10, &mut seeded_rng()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Overflow {
                quantity: "snr_loss_db"
            }
        );
    }

    // ─── Index Selection ────────────────────────────────────────────────

    #[test]
    fn chosen_indices_are_distinct_and_in_range() {
        let mut rng = seeded_rng();
        let idx = choose_indices(100, 40, &mut rng);
        assert_eq!(idx.len(), 40);
        let unique: HashSet<_> = idx.iter().copied().collect();
        assert_eq!(unique.len(), 40);
        assert!(idx.iter().all(|&i| i < 100));
    }
}
