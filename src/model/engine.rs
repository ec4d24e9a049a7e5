//! Forecast engine: maps a parameter record to the per-year result table.

use crate::error::Result;

use super::curves::{
    Z_95, ci_factor, compound_growth, exponential, exponential_rate_sensitivity, logistic,
    workload_logistic_energy,
};
use super::params::ForecastParameters;
use super::types::{ForecastResult, YearRecord};

/// Evaluates every forecast curve for each year of the horizon.
///
/// The engine is a pure function of `params`: no I/O, no shared state, and
/// identical inputs give bit-identical outputs. Years are independent of one
/// another; `t = year - start_year` is the only per-year input.
///
/// Overflow is not an error. Long horizons with large rates saturate to
/// `f64::INFINITY` (or NaN where infinities meet, e.g. the lower band once
/// both the point estimate and the band factor overflow); use
/// [`ForecastResult::is_finite`] to detect it.
///
/// # Errors
///
/// Returns the validation error of [`ForecastParameters::validate`] for
/// non-positive populations, non-finite inputs, negative sigmas or an
/// inverted horizon. No result is produced in that case.
///
/// # Examples
///
/// ```
/// use aiot_forecast::model::engine::forecast;
/// use aiot_forecast::model::params::ForecastParameters;
///
/// let params = ForecastParameters {
///     start_year: 2024,
///     end_year: 2024,
///     ..ForecastParameters::default()
/// };
/// let result = forecast(&params).unwrap();
/// let first = result.first().unwrap();
/// assert!((first.e_bu_exp - 1.4454e14).abs() / 1.4454e14 < 1e-12);
/// ```
pub fn forecast(params: &ForecastParameters) -> Result<ForecastResult> {
    params.validate()?;

    let a_bu = params.a_bu()?;
    let a_td = params.a_td()?;
    let per_device = params.energy_per_device();
    let sigma = params.combined_sigma();
    let td_base = params.n0_td * params.e0;
    let td_net_rate = params.r_n_td - params.rho;

    let records = (params.start_year..=params.end_year)
        .map(|year| {
            let t = year - params.start_year;

            let n_bu_exp = compound_growth(params.n0_bu, params.r_n_bu, t);
            let n_bu_log = logistic(params.k_bu, a_bu, params.r_n_bu, t);

            let e_td_exp = exponential(td_base, td_net_rate, t);
            let e_td_log =
                workload_logistic_energy(params.k_td, params.e0, a_td, params.r_n_td, params.rho, t);

            let de_dr_n = exponential_rate_sensitivity(e_td_exp, t);
            let factor = ci_factor(Z_95, sigma, t);

            YearRecord {
                year,
                n_bu_exp,
                n_bu_log,
                e_bu_exp: n_bu_exp * per_device,
                e_bu_log: n_bu_log * per_device,
                e_td_exp,
                e_td_log,
                de_dr_n,
                de_drho: -de_dr_n,
                e_td_lower: e_td_exp / factor,
                e_td_upper: e_td_exp * factor,
            }
        })
        .collect();

    Ok(ForecastResult::from_records(records))
}
