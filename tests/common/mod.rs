//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use aiot_forecast::model::params::ForecastParameters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Baseline parameters (2024–2035, defaults of the baseline scenario).
pub fn default_params() -> ForecastParameters {
    ForecastParameters::default()
}

/// Baseline parameters restricted to the 2024 anchor year.
pub fn single_year_params() -> ForecastParameters {
    ForecastParameters {
        n0_bu: 2e9,
        r_n_bu: 0.15,
        k_bu: 5e9,
        p_avg: 7.5,
        dt: 8760.0,
        overhead_pct: 0.10,
        start_year: 2024,
        end_year: 2024,
        ..ForecastParameters::default()
    }
}

/// Seeded generator so randomized checks are reproducible.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Draws a valid parameter set whose curves stay finite over the horizon.
pub fn random_params(rng: &mut StdRng) -> ForecastParameters {
    let n0_bu = rng.random_range(1e6..1e10);
    let n0_td = rng.random_range(1e9..1e15);
    let start_year = rng.random_range(2000..2050);
    ForecastParameters {
        n0_bu,
        r_n_bu: rng.random_range(0.0..0.5),
        k_bu: n0_bu * rng.random_range(0.5..5.0),
        p_avg: rng.random_range(0.1..50.0),
        dt: rng.random_range(100.0..8760.0),
        overhead_pct: rng.random_range(0.0..0.5),
        n0_td,
        e0: rng.random_range(1e-6..1e-2),
        r_n_td: rng.random_range(0.0..0.5),
        rho: rng.random_range(0.0..0.5),
        k_td: n0_td * rng.random_range(0.5..50.0),
        sigma_r: rng.random_range(0.0..0.2),
        sigma_rho: rng.random_range(0.0..0.2),
        start_year,
        end_year: start_year + rng.random_range(0..60),
    }
}

/// Relative equality with a floor so zero compares as zero.
pub fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}
