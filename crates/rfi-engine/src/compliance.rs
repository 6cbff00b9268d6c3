//! Exceedance-based compliance against ITU-R SA.1157 and SA.609.
//!
//! A standard is a (threshold, allowed time fraction) pair. The observed
//! fraction is the share of samples with SNR loss strictly above the
//! threshold, as a percentage rounded to three decimals (ties to even).
//! Equality with the limit is compliant.

use serde::Serialize;

use rfi_common::models::{ComplianceStatus, ComplianceVerdict, ServiceType};

use crate::samples::SampleSet;

/// One named threshold/limit rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Standard {
    pub name: &'static str,
    pub threshold_db: f64,
    pub max_time_fraction_pct: f64,
}

/// Deep-space research: SNR loss above 6 dB for at most 2 % of the time.
pub const SA_1157: Standard = Standard {
    name: "SA.1157",
    threshold_db: 6.0,
    max_time_fraction_pct: 2.0,
};

/// Near-Earth research: SNR loss above 1 dB for at most 0.1 % of the time.
pub const SA_609: Standard = Standard {
    name: "SA.609",
    threshold_db: 1.0,
    max_time_fraction_pct: 0.1,
};

impl Standard {
    pub fn for_service(service: ServiceType) -> Self {
        match service {
            ServiceType::DeepSpace => SA_1157,
            ServiceType::NearEarth => SA_609,
        }
    }

    pub fn evaluate(&self, samples: &SampleSet) -> ComplianceVerdict {
        evaluate(
            samples,
            self.threshold_db,
            self.max_time_fraction_pct,
            self.name,
        )
    }
}

/// Both fixed standards plus the one selected by the service type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub sa1157: ComplianceVerdict,
    pub sa609: ComplianceVerdict,
    pub overall: ComplianceVerdict,
}

/// Three-decimal rounding, halves to even.
fn round3(v: f64) -> f64 {
    (v * 1000.0).round_ties_even() / 1000.0
}

/// Judge `samples` against an arbitrary threshold/limit pair.
pub fn evaluate(
    samples: &SampleSet,
    threshold_db: f64,
    max_time_fraction_pct: f64,
    standard: &str,
) -> ComplianceVerdict {
    let observed = round3(samples.exceedance_pct(threshold_db));
    let status = if observed <= max_time_fraction_pct {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::NonCompliant
    };

    ComplianceVerdict {
        standard: standard.to_string(),
        threshold_db: Some(threshold_db),
        max_time_fraction_pct: Some(max_time_fraction_pct),
        observed_time_fraction_pct: Some(observed),
        status,
    }
}

/// Verdict of the standard bound to `service_type`, or the
/// `INVALID_SERVICE_TYPE` sentinel for an unknown literal.
pub fn overall_verdict(samples: &SampleSet, service_type: &str) -> ComplianceVerdict {
    match ServiceType::parse(service_type) {
        Some(service) => Standard::for_service(service).evaluate(samples),
        None => {
            tracing::warn!(service_type, "unrecognised service type");
            ComplianceVerdict::invalid_service(service_type)
        }
    }
}

/// Evaluate both standards and pick the overall verdict.
pub fn evaluate_service(samples: &SampleSet, service_type: &str) -> ComplianceReport {
    let sa1157 = SA_1157.evaluate(samples);
    let sa609 = SA_609.evaluate(samples);
    let overall = match ServiceType::parse(service_type) {
        Some(ServiceType::DeepSpace) => sa1157.clone(),
        Some(ServiceType::NearEarth) => sa609.clone(),
        None => overall_verdict(samples, service_type),
    };
    ComplianceReport {
        sa1157,
        sa609,
        overall,
    }
}
