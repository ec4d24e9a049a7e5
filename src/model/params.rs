//! Scalar parameter record consumed by the forecast engine.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Longest inclusive horizon a single forecast may span.
pub const MAX_HORIZON_YEARS: usize = 5_000;

/// Point estimates driving one forecast invocation.
///
/// Rates are annual fractions (`0.15` = 15 %/yr). Energies are in
/// watt-hours. The top-down logistic shape `A_td` is not stored; it is
/// derived from `k_td` and `n0_td` by [`ForecastParameters::a_td`] so the
/// two can never disagree.
///
/// # Examples
///
/// ```
/// use aiot_forecast::model::params::ForecastParameters;
///
/// let p = ForecastParameters::default();
/// assert!(p.validate().is_ok());
/// assert_eq!(p.horizon_len(), Some(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastParameters {
    /// Initial device count.
    pub n0_bu: f64,
    /// Bottom-up device growth rate.
    pub r_n_bu: f64,
    /// Device-population carrying capacity.
    pub k_bu: f64,
    /// Average power per device (W).
    pub p_avg: f64,
    /// Annual operating hours per device.
    pub dt: f64,
    /// Fractional overhead on raw device energy (cooling, networking).
    pub overhead_pct: f64,
    /// Baseline annual workload volume.
    pub n0_td: f64,
    /// Energy per unit of workload (Wh).
    pub e0: f64,
    /// Top-down workload growth rate.
    pub r_n_td: f64,
    /// Per-unit efficiency improvement rate.
    pub rho: f64,
    /// Workload saturation capacity.
    pub k_td: f64,
    /// Standard deviation of the workload growth rate.
    pub sigma_r: f64,
    /// Standard deviation of the efficiency rate.
    pub sigma_rho: f64,
    /// First forecast year.
    pub start_year: i32,
    /// Last forecast year (inclusive).
    pub end_year: i32,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self {
            n0_bu: 2e9,
            r_n_bu: 0.15,
            k_bu: 5e9,
            p_avg: 7.5,
            dt: 8760.0,
            overhead_pct: 0.10,
            n0_td: 2e9 * 1000.0 * 365.0,
            e0: 0.000154,
            r_n_td: 0.15,
            rho: 0.30,
            k_td: 1e16,
            sigma_r: 0.05,
            sigma_rho: 0.05,
            start_year: 2024,
            end_year: 2035,
        }
    }
}

impl ForecastParameters {
    /// Checks the conditions the closed-form curves need.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::InvalidParameter`] if any float is non-finite, if
    ///   `n0_bu` or `n0_td` is not strictly positive, or if a sigma is negative.
    /// - [`ForecastError::DegenerateHorizon`] if `end_year < start_year`.
    /// - [`ForecastError::InvalidParameter`] on `end_year` if the horizon
    ///   spans more than [`MAX_HORIZON_YEARS`] years.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ForecastError::invalid(
                    field,
                    format!("must be finite, got {value}"),
                ));
            }
        }

        if self.n0_bu <= 0.0 {
            return Err(ForecastError::invalid(
                "n0_bu",
                format!("initial device count must be > 0, got {}", self.n0_bu),
            ));
        }
        if self.n0_td <= 0.0 {
            return Err(ForecastError::invalid(
                "n0_td",
                format!("baseline workload must be > 0, got {}", self.n0_td),
            ));
        }
        if self.sigma_r < 0.0 {
            return Err(ForecastError::invalid(
                "sigma_r",
                format!("must be >= 0, got {}", self.sigma_r),
            ));
        }
        if self.sigma_rho < 0.0 {
            return Err(ForecastError::invalid(
                "sigma_rho",
                format!("must be >= 0, got {}", self.sigma_rho),
            ));
        }
        if self.end_year < self.start_year {
            return Err(ForecastError::DegenerateHorizon {
                start_year: self.start_year,
                end_year: self.end_year,
            });
        }
        if self.horizon_len().is_none_or(|n| n > MAX_HORIZON_YEARS) {
            return Err(ForecastError::invalid(
                "end_year",
                format!(
                    "horizon {}..={} exceeds {MAX_HORIZON_YEARS} years",
                    self.start_year, self.end_year
                ),
            ));
        }
        Ok(())
    }

    /// Bottom-up logistic shape parameter `K_bu / N0_bu - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidParameter`] if `n0_bu <= 0` or the
    /// quotient is not finite.
    pub fn a_bu(&self) -> Result<f64> {
        logistic_shape("n0_bu", self.k_bu, self.n0_bu)
    }

    /// Top-down logistic shape parameter `K_td / N0_td - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidParameter`] if `n0_td <= 0` or the
    /// quotient is not finite.
    pub fn a_td(&self) -> Result<f64> {
        logistic_shape("n0_td", self.k_td, self.n0_td)
    }

    /// Combined rate uncertainty `sqrt(sigma_r² + sigma_rho²)`.
    pub fn combined_sigma(&self) -> f64 {
        self.sigma_r.hypot(self.sigma_rho)
    }

    /// Per-device annual energy including overhead (Wh).
    pub fn energy_per_device(&self) -> f64 {
        self.p_avg * self.dt * (1.0 + self.overhead_pct)
    }

    /// Number of years in the inclusive horizon, or `None` if it is empty.
    pub fn horizon_len(&self) -> Option<usize> {
        let span = i64::from(self.end_year) - i64::from(self.start_year);
        usize::try_from(span + 1).ok().filter(|&n| n > 0)
    }

    fn float_fields(&self) -> [(&'static str, f64); 13] {
        [
            ("n0_bu", self.n0_bu),
            ("r_n_bu", self.r_n_bu),
            ("k_bu", self.k_bu),
            ("p_avg", self.p_avg),
            ("dt", self.dt),
            ("overhead_pct", self.overhead_pct),
            ("n0_td", self.n0_td),
            ("e0", self.e0),
            ("r_n_td", self.r_n_td),
            ("rho", self.rho),
            ("k_td", self.k_td),
            ("sigma_r", self.sigma_r),
            ("sigma_rho", self.sigma_rho),
        ]
    }
}

fn logistic_shape(field: &'static str, capacity: f64, initial: f64) -> Result<f64> {
    if initial.is_nan() || initial <= 0.0 {
        return Err(ForecastError::invalid(
            field,
            format!("must be > 0 to derive the logistic shape, got {initial}"),
        ));
    }
    let a = capacity / initial - 1.0;
    if !a.is_finite() {
        return Err(ForecastError::invalid(
            field,
            format!("logistic shape {capacity} / {initial} - 1 is not finite"),
        ));
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ForecastParameters::default().validate().is_ok());
    }

    #[test]
    fn default_workload_is_daily_inferences_times_devices() {
        let p = ForecastParameters::default();
        assert_eq!(p.n0_td, 7.3e14);
    }

    #[test]
    fn zero_initial_devices_rejected() {
        let p = ForecastParameters {
            n0_bu: 0.0,
            ..ForecastParameters::default()
        };
        let err = p.validate().unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidParameter { field: "n0_bu", .. }
        ));
        assert!(p.a_bu().is_err());
    }

    #[test]
    fn negative_workload_rejected() {
        let p = ForecastParameters {
            n0_td: -1.0,
            ..ForecastParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ForecastError::InvalidParameter { field: "n0_td", .. })
        ));
        assert!(p.a_td().is_err());
    }

    #[test]
    fn nan_rate_rejected() {
        let p = ForecastParameters {
            rho: f64::NAN,
            ..ForecastParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ForecastError::InvalidParameter { field: "rho", .. })
        ));
    }

    #[test]
    fn negative_sigma_rejected() {
        let p = ForecastParameters {
            sigma_rho: -0.01,
            ..ForecastParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ForecastError::InvalidParameter {
                field: "sigma_rho",
                ..
            })
        ));
    }

    #[test]
    fn inverted_horizon_is_degenerate() {
        let p = ForecastParameters {
            start_year: 2030,
            end_year: 2029,
            ..ForecastParameters::default()
        };
        assert_eq!(
            p.validate(),
            Err(ForecastError::DegenerateHorizon {
                start_year: 2030,
                end_year: 2029,
            })
        );
        assert_eq!(p.horizon_len(), None);
    }

    #[test]
    fn shape_parameters_from_defaults() {
        let p = ForecastParameters::default();
        assert!((p.a_bu().unwrap() - 1.5).abs() < 1e-12);
        let expected = 1e16 / 7.3e14 - 1.0;
        assert!((p.a_td().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn combined_sigma_is_root_sum_of_squares() {
        let p = ForecastParameters {
            sigma_r: 0.03,
            sigma_rho: 0.04,
            ..ForecastParameters::default()
        };
        assert!((p.combined_sigma() - 0.05).abs() < 1e-15);
    }

    #[test]
    fn horizon_at_limit_is_accepted() {
        let p = ForecastParameters {
            start_year: 2024,
            end_year: 2024 + MAX_HORIZON_YEARS as i32 - 1,
            ..ForecastParameters::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn overlong_horizon_rejected() {
        let p = ForecastParameters {
            start_year: 0,
            end_year: 20_000_000,
            ..ForecastParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ForecastError::InvalidParameter { field: "end_year", .. })
        ));

        let full = ForecastParameters {
            start_year: i32::MIN,
            end_year: i32::MAX,
            ..ForecastParameters::default()
        };
        assert!(full.validate().is_err());
    }

    #[test]
    fn single_year_horizon() {
        let p = ForecastParameters {
            start_year: 2024,
            end_year: 2024,
            ..ForecastParameters::default()
        };
        assert_eq!(p.horizon_len(), Some(1));
    }
}
