//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::params::{ForecastParameters, MAX_HORIZON_YEARS};
use crate::units::DisplayUnit;

/// Days per year used to turn daily per-device inferences into annual workload.
const DAYS_PER_YEAR: f64 = 365.0;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Device-population model parameters.
    #[serde(default)]
    pub bottom_up: BottomUpConfig,
    /// Workload model parameters.
    #[serde(default)]
    pub top_down: TopDownConfig,
    /// Rate uncertainty for the confidence band.
    #[serde(default)]
    pub uncertainty: UncertaintyConfig,
    /// Forecast year range.
    #[serde(default)]
    pub horizon: HorizonConfig,
    /// Presentation settings for tables and exports.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Device-population model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BottomUpConfig {
    /// Devices in the start year.
    pub initial_devices: f64,
    /// Annual device growth rate (0.0–0.5).
    pub growth_rate: f64,
    /// Maximum device population (carrying capacity).
    pub carrying_capacity: f64,
    /// Average power per active device (W).
    pub avg_power_w: f64,
    /// Annual operating hours per device (8760 = always on).
    pub hours_per_year: f64,
    /// Overhead for cooling and networking as a fraction (0.10 = 10 %).
    pub overhead_pct: f64,
}

impl Default for BottomUpConfig {
    fn default() -> Self {
        Self {
            initial_devices: 2e9,
            growth_rate: 0.15,
            carrying_capacity: 5e9,
            avg_power_w: 7.5,
            hours_per_year: 8760.0,
            overhead_pct: 0.10,
        }
    }
}

/// Workload model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopDownConfig {
    /// Inferences per device per day, used when `annual_workload` is unset.
    pub daily_inferences_per_device: f64,
    /// Total inferences per year; derived from the device base when absent.
    pub annual_workload: Option<f64>,
    /// Energy per inference (Wh).
    pub energy_per_unit_wh: f64,
    /// Annual workload growth rate (0.0–0.5).
    pub growth_rate: f64,
    /// Annual efficiency improvement per inference (0.0–0.5).
    pub efficiency_gain: f64,
    /// Maximum sustainable annual workload.
    pub saturation: f64,
}

impl Default for TopDownConfig {
    fn default() -> Self {
        Self {
            daily_inferences_per_device: 1000.0,
            annual_workload: None,
            energy_per_unit_wh: 0.000154,
            growth_rate: 0.15,
            efficiency_gain: 0.30,
            saturation: 1e16,
        }
    }
}

/// Rate uncertainty for the confidence band.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UncertaintyConfig {
    /// Standard deviation of the workload growth rate (0.0–0.2).
    pub sigma_r: f64,
    /// Standard deviation of the efficiency gain (0.0–0.2).
    pub sigma_rho: f64,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            sigma_r: 0.05,
            sigma_rho: 0.05,
        }
    }
}

/// Forecast year range, inclusive on both ends.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonConfig {
    /// Baseline year.
    pub start_year: i32,
    /// Final projection year.
    pub end_year: i32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start_year: 2024,
            end_year: 2035,
        }
    }
}

/// Presentation settings for tables and exports.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Energy display unit.
    pub unit: DisplayUnit,
    /// Decimal places in tabular output.
    pub decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            unit: DisplayUnit::TWh,
            decimals: 3,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"bottom_up.growth_rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl TopDownConfig {
    /// Annual workload, falling back to `devices × daily inferences × 365`.
    pub fn resolved_workload(&self, initial_devices: f64) -> f64 {
        self.annual_workload
            .unwrap_or(initial_devices * self.daily_inferences_per_device * DAYS_PER_YEAR)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the saturating preset: installed base near capacity, slow efficiency gains.
    pub fn saturating() -> Self {
        Self {
            bottom_up: BottomUpConfig {
                carrying_capacity: 2.5e9,
                growth_rate: 0.25,
                ..BottomUpConfig::default()
            },
            top_down: TopDownConfig {
                saturation: 1.2e15,
                growth_rate: 0.25,
                efficiency_gain: 0.10,
                ..TopDownConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the efficiency-lag preset: workload growth outpaces efficiency gains.
    pub fn efficiency_lag() -> Self {
        Self {
            top_down: TopDownConfig {
                growth_rate: 0.35,
                efficiency_gain: 0.12,
                ..TopDownConfig::default()
            },
            uncertainty: UncertaintyConfig {
                sigma_r: 0.08,
                sigma_rho: 0.04,
            },
            ..Self::default()
        }
    }

    /// Returns the long-horizon preset: the baseline projected to 2100.
    pub fn long_horizon() -> Self {
        Self {
            horizon: HorizonConfig {
                start_year: 2024,
                end_year: 2100,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "saturating", "efficiency_lag", "long_horizon"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "saturating" => Ok(Self::saturating()),
            "efficiency_lag" => Ok(Self::efficiency_lag()),
            "long_horizon" => Ok(Self::long_horizon()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Converts the scenario into the engine's parameter record.
    pub fn to_parameters(&self) -> ForecastParameters {
        let bu = &self.bottom_up;
        let td = &self.top_down;
        ForecastParameters {
            n0_bu: bu.initial_devices,
            r_n_bu: bu.growth_rate,
            k_bu: bu.carrying_capacity,
            p_avg: bu.avg_power_w,
            dt: bu.hours_per_year,
            overhead_pct: bu.overhead_pct,
            n0_td: td.resolved_workload(bu.initial_devices),
            e0: td.energy_per_unit_wh,
            r_n_td: td.growth_rate,
            rho: td.efficiency_gain,
            k_td: td.saturation,
            sigma_r: self.uncertainty.sigma_r,
            sigma_rho: self.uncertainty.sigma_rho,
            start_year: self.horizon.start_year,
            end_year: self.horizon.end_year,
        }
    }

    /// Validates all fields against the input ranges and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. The engine performs
    /// its own guards independently of these checks.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let bu = &self.bottom_up;
        positive(&mut errors, "bottom_up.initial_devices", bu.initial_devices);
        in_range(&mut errors, "bottom_up.growth_rate", bu.growth_rate, 0.0, 0.5);
        positive(&mut errors, "bottom_up.carrying_capacity", bu.carrying_capacity);
        positive(&mut errors, "bottom_up.avg_power_w", bu.avg_power_w);
        positive(&mut errors, "bottom_up.hours_per_year", bu.hours_per_year);
        in_range(&mut errors, "bottom_up.overhead_pct", bu.overhead_pct, 0.0, 0.5);

        let td = &self.top_down;
        positive(
            &mut errors,
            "top_down.daily_inferences_per_device",
            td.daily_inferences_per_device,
        );
        if let Some(workload) = td.annual_workload {
            positive(&mut errors, "top_down.annual_workload", workload);
        }
        positive(&mut errors, "top_down.energy_per_unit_wh", td.energy_per_unit_wh);
        in_range(&mut errors, "top_down.growth_rate", td.growth_rate, 0.0, 0.5);
        in_range(&mut errors, "top_down.efficiency_gain", td.efficiency_gain, 0.0, 0.5);
        positive(&mut errors, "top_down.saturation", td.saturation);

        let u = &self.uncertainty;
        in_range(&mut errors, "uncertainty.sigma_r", u.sigma_r, 0.0, 0.2);
        in_range(&mut errors, "uncertainty.sigma_rho", u.sigma_rho, 0.0, 0.2);

        let h = &self.horizon;
        if h.start_year > h.end_year {
            errors.push(ConfigError::new(
                "horizon.start_year",
                "must be <= horizon.end_year",
            ));
        } else if i64::from(h.end_year) - i64::from(h.start_year) >= MAX_HORIZON_YEARS as i64 {
            errors.push(ConfigError::new(
                "horizon.end_year",
                format!("horizon must span at most {MAX_HORIZON_YEARS} years"),
            ));
        }

        if self.output.decimals > 12 {
            errors.push(ConfigError::new("output.decimals", "must be <= 12"));
        }

        errors
    }
}

fn positive(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::new(field, format!("must be > 0, got {value}")));
    }
}

fn in_range(errors: &mut Vec<ConfigError>, field: &str, value: f64, lo: f64, hi: f64) {
    if !(lo..=hi).contains(&value) {
        errors.push(ConfigError::new(
            field,
            format!("must be in [{lo}, {hi}], got {value}"),
        ));
    }
}
