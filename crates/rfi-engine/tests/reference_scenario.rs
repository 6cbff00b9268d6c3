//! End-to-end engine runs on fixed scenarios.

use rand::SeedableRng;
use rand::rngs::StdRng;

use rfi_common::models::{BandParameters, ComplianceStatus, Interferer};
use rfi_common::presets::BandRegistry;
use rfi_engine::EngineSettings;
use rfi_engine::monte_carlo::MonteCarloSampler;
use rfi_engine::samples::SampleSet;
use rfi_engine::scenario::{AggregateScenario, run_aggregate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("rfi_engine=debug")
        .with_test_writer()
        .try_init();
}

fn s_band() -> BandParameters {
    BandParameters::new(2.25, 35786.0, 26.0, 30.0, 2.0).unwrap()
}

#[test]
fn s_band_single_interferer() {
    init_tracing();
    let band = s_band();
    let list = [Interferer::new(40.0, 500.0, 5.0).unwrap()];
    let sc = AggregateScenario {
        band: &band,
        interferers: &list,
        service_type: "deep-space",
        sample_count: 10_000,
    };
    let out = run_aggregate(&sc, &EngineSettings::default(), &mut StdRng::seed_from_u64(2024))
        .unwrap();

    // 5° is the main-lobe edge for θ3dB = 2°: side-lobe floor applies.
    assert_eq!(out.aggregate.entries[0].off_axis_gain_db, 0.0);
    assert!(out.aggregate.snr_loss_db > 0.0);
    assert!(out.aggregate.epfd_aggregate_dbw_m2_mhz.is_finite());
    assert!(out.aggregate.snr_with_interference_db < out.link.baseline_snr_db);
    assert_eq!(out.samples.len(), 10_000);
    assert_eq!(out.compliance.overall.standard, "SA.1157");
}

#[test]
fn outcome_serializes_with_engine_field_names() {
    let band = s_band();
    let list = [Interferer::new(40.0, 500.0, 5.0).unwrap()];
    let sc = AggregateScenario {
        band: &band,
        interferers: &list,
        service_type: "near-earth",
        sample_count: 200,
    };
    let out =
        run_aggregate(&sc, &EngineSettings::default(), &mut StdRng::seed_from_u64(3)).unwrap();
    let v = serde_json::to_value(&out).unwrap();

    assert!(v["link"]["baseline_snr_db"].is_f64());
    assert!(v["aggregate"]["i_aggregate_dbw"].is_f64());
    assert_eq!(v["aggregate"]["entries"].as_array().unwrap().len(), 1);
    assert_eq!(v["samples"].as_array().unwrap().len(), 200);
    assert_eq!(
        v["ccdf"]["x"].as_array().unwrap().len(),
        v["ccdf"]["fraction"].as_array().unwrap().len()
    );
    assert!(v["exceedance"]["gt_6db_pct"].is_f64());
    assert_eq!(v["compliance"]["overall"], v["compliance"]["sa609"]);
}

#[test]
fn negligible_interference_is_compliant() {
    init_tracing();
    let band = s_band();
    let list = [Interferer::new(-100.0, 40_000.0, 30.0).unwrap()];
    let sc = AggregateScenario {
        band: &band,
        interferers: &list,
        service_type: "near-earth",
        sample_count: 2_000,
    };
    let out =
        run_aggregate(&sc, &EngineSettings::default(), &mut StdRng::seed_from_u64(5)).unwrap();
    assert!(out.aggregate.snr_loss_db < 1e-6);
    assert_eq!(out.compliance.sa609.status, ComplianceStatus::Compliant);
    assert_eq!(out.compliance.sa1157.status, ComplianceStatus::Compliant);
    assert_eq!(out.compliance.overall, out.compliance.sa609);
}

#[test]
fn every_builtin_preset_runs() {
    init_tracing();
    let registry = BandRegistry::builtin();
    let list = [Interferer::new(30.0, 1000.0, 1.0).unwrap()];
    for preset in registry.iter() {
        let sc = AggregateScenario {
            band: &preset.band,
            interferers: &list,
            service_type: "deep-space",
            sample_count: 500,
        };
        let settings = EngineSettings::default().with_noise(preset.noise);
        let out = run_aggregate(&sc, &settings, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(out.link.baseline_snr_db.is_finite(), "{}", preset.name);
        assert!(out.aggregate.snr_loss_db >= 0.0, "{}", preset.name);
    }
}

#[test]
fn full_duty_sigma_converges() {
    let sampler = MonteCarloSampler::new(-150.0, 4.0, 1.0).unwrap();
    let draws = sampler
        .interference_samples(100_000, &mut StdRng::seed_from_u64(11))
        .unwrap();
    let set = SampleSet::new(draws).unwrap();
    assert!((set.mean() + 150.0).abs() < 0.1);
    assert!((set.std_dev() - 4.0).abs() < 0.1);
}
