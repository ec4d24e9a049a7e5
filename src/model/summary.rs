//! Post-hoc summary statistics over a forecast result.

use std::fmt;

use serde::Serialize;

use super::params::ForecastParameters;
use super::types::{Curve, ForecastResult};
use crate::units::DisplayUnit;

/// Horizon-level figures derived from a complete [`ForecastResult`].
///
/// Computed after the fact from the result table so the summary can never
/// disagree with the per-year records it describes.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastSummary {
    /// Number of forecast years.
    pub years: usize,
    /// First forecast year.
    pub start_year: i32,
    /// Last forecast year.
    pub end_year: i32,
    /// Final-year energy per model variant (Wh), in [`Curve::MODELS`] order.
    pub final_energy_wh: [f64; 4],
    /// Compound annual growth rate per model variant over the horizon.
    ///
    /// `None` for a single-year horizon or a non-positive start value.
    pub cagr: [Option<f64>; 4],
    /// Final-year band ratio `upper / lower` of the top-down exponential model.
    pub final_ci_ratio: f64,
    /// Final-year logistic device count as a fraction of carrying capacity.
    pub saturation_fraction: f64,
    /// Number of years holding at least one non-finite value.
    pub non_finite_years: usize,
    /// Unit used when rendering with `Display`.
    pub unit: DisplayUnit,
}

impl ForecastSummary {
    /// Summarises `result`, which must come from `params`.
    ///
    /// # Arguments
    ///
    /// * `result` - Complete forecast table
    /// * `params` - Parameters the table was computed from
    /// * `unit` - Unit used by the `Display` rendering
    pub fn from_result(
        result: &ForecastResult,
        params: &ForecastParameters,
        unit: DisplayUnit,
    ) -> Self {
        let (Some(first), Some(last)) = (result.first(), result.last()) else {
            return Self {
                years: 0,
                start_year: params.start_year,
                end_year: params.end_year,
                final_energy_wh: [0.0; 4],
                cagr: [None; 4],
                final_ci_ratio: 1.0,
                saturation_fraction: 0.0,
                non_finite_years: 0,
                unit,
            };
        };

        let span = last.year - first.year;
        let final_energy_wh = Curve::MODELS.map(|c| last.value(c));
        let cagr = Curve::MODELS.map(|c| compound_annual_growth(first.value(c), last.value(c), span));

        let saturation_fraction = if params.k_bu != 0.0 {
            last.n_bu_log / params.k_bu
        } else {
            f64::NAN
        };

        Self {
            years: result.len(),
            start_year: first.year,
            end_year: last.year,
            final_energy_wh,
            cagr,
            final_ci_ratio: last.e_td_upper / last.e_td_lower,
            saturation_fraction,
            non_finite_years: result.non_finite_years().len(),
            unit,
        }
    }
}

fn compound_annual_growth(start: f64, end: f64, span: i32) -> Option<f64> {
    if span <= 0 || start <= 0.0 || !start.is_finite() {
        return None;
    }
    Some((end / start).powf(1.0 / f64::from(span)) - 1.0)
}

impl fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Forecast Summary ---")?;
        writeln!(
            f,
            "Horizon:               {}-{} ({} years)",
            self.start_year, self.end_year, self.years
        )?;
        for (i, curve) in Curve::MODELS.iter().enumerate() {
            let cagr = self.cagr[i].map_or_else(|| "n/a".to_string(), |g| format!("{:+.2}%", g * 100.0));
            writeln!(
                f,
                "{:<8} final:        {:.3} {} (CAGR {cagr})",
                curve.model_name(),
                self.unit.scale(self.final_energy_wh[i]),
                self.unit,
            )?;
        }
        writeln!(f, "95% band ratio:        {:.3}x", self.final_ci_ratio)?;
        writeln!(
            f,
            "Device saturation:     {:.1}%",
            self.saturation_fraction * 100.0
        )?;
        write!(f, "Non-finite years:      {}", self.non_finite_years)
    }
}
