use rand::Rng;
use serde::Serialize;

use rfi_common::error;
use rfi_common::models::{
    BandParameters, ComplianceVerdict, DynamicInterferer, Interferer, NoiseParameters,
};
use rfi_common::ValidationError;

use crate::aggregate::{AggregateResult, InterferenceAggregator};
use crate::ccdf::{self, Ccdf, DEFAULT_CCDF_POINTS};
use crate::compliance::{self, ComplianceReport};
use crate::dynamic_pass::{DynamicPassSimulator, DynamicTimeSeries, TimeGrid};
use crate::link_budget::LinkBudget;
use crate::monte_carlo::{MonteCarloSampler, StatisticsSource};
use crate::samples::SampleSet;

/// Engine-wide constants that are not part of a band definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Receiver noise used for `N = kTB` and the epfd bandwidth term.
    pub noise: NoiseParameters,
    /// Nominal atmospheric loss applied to carrier and interference.
    pub atm_loss_db: f64,
    /// Evaluation points of the CCDF.
    pub ccdf_points: usize,
    /// Which interferer supplies σ and duty cycle for the ensemble.
    pub statistics: StatisticsSource,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            noise: NoiseParameters::default(),
            atm_loss_db: 0.0,
            ccdf_points: DEFAULT_CCDF_POINTS,
            statistics: StatisticsSource::FirstInterferer,
        }
    }
}

impl EngineSettings {
    /// Same settings with a different receiver noise (e.g. from a band preset).
    pub fn with_noise(self, noise: NoiseParameters) -> Self {
        Self { noise, ..self }
    }
}

/// One aggregate Monte Carlo study.
#[derive(Debug, Clone, Copy)]
pub struct AggregateScenario<'a> {
    pub band: &'a BandParameters,
    pub interferers: &'a [Interferer],
    pub service_type: &'a str,
    pub sample_count: usize,
}

/// Percentage of samples above the conventional 1/3/6 dB loss marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exceedance {
    pub gt_1db_pct: f64,
    pub gt_3db_pct: f64,
    pub gt_6db_pct: f64,
}

impl Exceedance {
    pub fn of(samples: &SampleSet) -> Self {
        Self {
            gt_1db_pct: samples.exceedance_pct(1.0),
            gt_3db_pct: samples.exceedance_pct(3.0),
            gt_6db_pct: samples.exceedance_pct(6.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutcome {
    pub link: LinkBudget,
    pub aggregate: AggregateResult,
    pub samples: SampleSet,
    pub ccdf: Ccdf,
    pub exceedance: Exceedance,
    pub compliance: ComplianceReport,
}

/// Deterministic budget, Monte Carlo ensemble, CCDF and compliance for an
/// aggregate scenario.
///
/// All inputs are validated before any sample is drawn.
pub fn run_aggregate(
    scenario: &AggregateScenario<'_>,
    settings: &EngineSettings,
    rng: &mut impl Rng,
) -> Result<AggregateOutcome, ValidationError> {
    if scenario.interferers.is_empty() {
        return Err(ValidationError::EmptyInterferers);
    }
    error::nonzero_count("time_samples", scenario.sample_count)?;
    error::nonzero_count("ccdf_points", settings.ccdf_points)?;

    let link = LinkBudget::compute(scenario.band, &settings.noise, settings.atm_loss_db);
    tracing::debug!(
        carrier_dbw = link.carrier_dbw,
        noise_dbw = link.noise_dbw,
        baseline_snr_db = link.baseline_snr_db,
        "link budget"
    );

    let aggregator =
        InterferenceAggregator::new(scenario.band, &settings.noise, settings.atm_loss_db)?;
    let aggregate = aggregator.aggregate(&link, scenario.interferers)?;

    let sampler = MonteCarloSampler::for_scenario(
        aggregate.i_aggregate_dbw,
        scenario.interferers,
        settings.statistics,
    )?;
    let samples = sampler.snr_loss_samples(&link, scenario.sample_count, rng)?;
    tracing::debug!(
        samples = samples.len(),
        sigma_db = sampler.sigma_db(),
        duty_cycle = sampler.duty_cycle(),
        "monte carlo ensemble drawn"
    );

    let ccdf = ccdf::estimate(&samples, settings.ccdf_points)?;
    let exceedance = Exceedance::of(&samples);
    let compliance = compliance::evaluate_service(&samples, scenario.service_type);

    tracing::info!(
        interferers = scenario.interferers.len(),
        snr_loss_db = aggregate.snr_loss_db,
        overall = compliance.overall.status.as_str(),
        "aggregate scenario complete"
    );

    Ok(AggregateOutcome {
        link,
        aggregate,
        samples,
        ccdf,
        exceedance,
        compliance,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicOutcome {
    pub link: LinkBudget,
    pub series: DynamicTimeSeries,
    pub overall: ComplianceVerdict,
}

/// Sweep a moving interferer and judge the whole time series against the
/// standard bound to `service_type`.
pub fn run_dynamic(
    band: &BandParameters,
    interferer: &DynamicInterferer,
    grid: &TimeGrid,
    service_type: &str,
    settings: &EngineSettings,
) -> Result<DynamicOutcome, ValidationError> {
    let sim = DynamicPassSimulator::new(band, &settings.noise, settings.atm_loss_db)?;
    let series = sim.simulate(interferer, grid)?;
    let overall = compliance::overall_verdict(&series.to_sample_set()?, service_type);

    tracing::info!(
        steps = series.len(),
        peak_snr_loss_db = series.peak_snr_loss_db(),
        overall = overall.status.as_str(),
        "dynamic pass complete"
    );

    Ok(DynamicOutcome {
        link: *sim.link(),
        series,
        overall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rfi_common::models::ComplianceStatus;

    fn s_band() -> BandParameters {
        BandParameters::new(2.25, 35786.0, 26.0, 30.0, 2.0).unwrap()
    }

    fn scenario<'a>(band: &'a BandParameters, list: &'a [Interferer]) -> AggregateScenario<'a> {
        AggregateScenario {
            band,
            interferers: list,
            service_type: "deep-space",
            sample_count: 10_000,
        }
    }

    #[test]
    fn reference_scenario_degrades_snr() {
        let band = s_band();
        let list = [Interferer::with_statistics(40.0, 500.0, 5.0, 4.0, 1.0).unwrap()];
        let out = run_aggregate(
            &scenario(&band, &list),
            &EngineSettings::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        assert!(out.aggregate.snr_loss_db > 0.0);
        assert!(out.aggregate.epfd_aggregate_dbw_m2_mhz.is_finite());
        assert_eq!(out.samples.len(), 10_000);
        assert_eq!(out.ccdf.x.len(), DEFAULT_CCDF_POINTS);
        assert_eq!(out.compliance.overall, out.compliance.sa1157);
    }

    #[test]
    fn empty_scenario_rejected_before_sampling() {
        let band = s_band();
        let err = run_aggregate(
            &scenario(&band, &[]),
            &EngineSettings::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyInterferers);
    }

    #[test]
    fn zero_samples_rejected() {
        let band = s_band();
        let list = [Interferer::new(40.0, 500.0, 5.0).unwrap()];
        let mut sc = scenario(&band, &list);
        sc.sample_count = 0;
        assert!(
            run_aggregate(&sc, &EngineSettings::default(), &mut StdRng::seed_from_u64(1)).is_err()
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let band = s_band();
        let list = [Interferer::with_statistics(40.0, 500.0, 5.0, 4.0, 0.6).unwrap()];
        let settings = EngineSettings::default();
        let a = run_aggregate(&scenario(&band, &list), &settings, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = run_aggregate(&scenario(&band, &list), &settings, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exceedance_is_ordered() {
        let band = s_band();
        let list = [Interferer::new(5.0, 2000.0, 0.5).unwrap()];
        let out = run_aggregate(
            &scenario(&band, &list),
            &EngineSettings::default(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
        let e = out.exceedance;
        assert!(e.gt_1db_pct >= e.gt_3db_pct);
        assert!(e.gt_3db_pct >= e.gt_6db_pct);
    }

    #[test]
    fn dynamic_pass_with_unknown_service_keeps_series() {
        let band = BandParameters::new(8.0, 35786.0, 30.0, 35.0, 1.5).unwrap();
        let i = DynamicInterferer::new(20.0, 500.0, 0.2, 1.0, 0.05).unwrap();
        let grid = TimeGrid::new(60.0, 1.0).unwrap();
        let out = run_dynamic(&band, &i, &grid, "mars-relay", &EngineSettings::default()).unwrap();
        assert_eq!(out.series.len(), 60);
        assert_eq!(out.overall.status, ComplianceStatus::InvalidServiceType);
    }

    #[test]
    fn preset_noise_changes_baseline() {
        let band = s_band();
        let list = [Interferer::new(40.0, 500.0, 5.0).unwrap()];
        let hot = EngineSettings::default().with_noise(NoiseParameters::new(320.0, 1e6).unwrap());
        let a = run_aggregate(
            &scenario(&band, &list),
            &EngineSettings::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let b = run_aggregate(&scenario(&band, &list), &hot, &mut StdRng::seed_from_u64(1)).unwrap();
        let expected = 10.0 * (320.0f64 / 250.0).log10();
        assert!((a.link.baseline_snr_db - b.link.baseline_snr_db - expected).abs() < 1e-9);
    }
}
