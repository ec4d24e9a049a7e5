//! Closed-form growth and decay curves.
//!
//! Every function takes the elapsed time `t` in years since the start of the
//! horizon. None of them clamp: overflow saturates to `f64::INFINITY` (or
//! yields NaN where two infinities meet) so callers can detect it.

/// Two-sided z-score of the 95 % normal interval.
pub const Z_95: f64 = 1.96;

/// Compound growth `n0 · (1 + rate)^t`.
pub fn compound_growth(n0: f64, rate: f64, t: i32) -> f64 {
    n0 * (1.0 + rate).powi(t)
}

/// Logistic curve `capacity / (1 + shape · e^(−rate · t))`.
///
/// `shape` is `capacity / initial - 1`, so the curve passes through
/// `initial` at `t = 0` and tends towards `capacity`.
pub fn logistic(capacity: f64, shape: f64, rate: f64, t: i32) -> f64 {
    // A zero shape is the flat curve; skip 0 · inf when the exponential overflows.
    if shape == 0.0 {
        return capacity;
    }
    capacity / (1.0 + shape * (-rate * f64::from(t)).exp())
}

/// Continuous exponential `base · e^(rate · t)`.
pub fn exponential(base: f64, rate: f64, t: i32) -> f64 {
    base * (rate * f64::from(t)).exp()
}

/// Top-down logistic energy `K_td · e0 · e^(−rho·t) / (1 + A_td · e^(−rN_td·t))`.
pub fn workload_logistic_energy(
    k_td: f64,
    e0: f64,
    a_td: f64,
    r_n_td: f64,
    rho: f64,
    t: i32,
) -> f64 {
    let efficiency = (-rho * f64::from(t)).exp();
    logistic(k_td * e0, a_td, r_n_td, t) * efficiency
}

/// Partial derivative of `base · e^(rate · t)` with respect to `rate`,
/// given the already evaluated curve value.
///
/// `∂/∂rate [base · e^(rate·t)] = t · base · e^(rate·t)`. With the net rate
/// `rN_td − rho` the derivative with respect to `rho` is the negation.
pub fn exponential_rate_sensitivity(value: f64, t: i32) -> f64 {
    f64::from(t) * value
}

/// Multiplicative half-width `e^(z · t · sigma)` of a log-symmetric band.
pub fn ci_factor(z: f64, sigma: f64, t: i32) -> f64 {
    (z * f64::from(t) * sigma).exp()
}
