//! Interference evaluation engine for satellite links.
//!
//! Computes link budgets, aggregates multi-entry interference in the linear
//! power domain, samples SNR-loss statistics with an explicit seeded random
//! source, and judges the result against ITU-R SA.1157 / SA.609 exceedance
//! limits. A separate deterministic path sweeps a single moving interferer
//! through the receive beam.
//!
//! Every entry point is a pure function of its inputs (plus the caller's
//! RNG for Monte Carlo); nothing is cached between calls.

pub mod aggregate;
pub mod antenna;
pub mod ccdf;
pub mod compliance;
pub mod dynamic_pass;
pub mod link_budget;
pub mod monte_carlo;
pub mod samples;
pub mod scenario;
pub mod units;

pub use rfi_common::ValidationError;
pub use scenario::EngineSettings;
