//! Scenario runner: config validation, engine invocation and summary.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ScenarioConfig};
use crate::error::ForecastError;
use crate::model::engine::forecast;
use crate::model::params::ForecastParameters;
use crate::model::summary::ForecastSummary;
use crate::model::types::ForecastResult;

/// Everything produced by one scenario run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    pub parameters: ForecastParameters,
    pub result: ForecastResult,
    pub summary: ForecastSummary,
}

/// Reasons a scenario run can fail.
#[derive(Debug, Error)]
pub enum RunError {
    /// The scenario violates one or more input constraints.
    #[error("{} configuration error(s), first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Config(Vec<ConfigError>),
    /// The engine rejected the derived parameters.
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Validates `config`, runs the engine and summarises the result.
///
/// # Errors
///
/// Returns [`RunError::Config`] with every constraint violation, or
/// [`RunError::Forecast`] if the engine rejects the parameters.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ForecastRun, RunError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(RunError::Config(errors));
    }
    run_parameters(config.to_parameters(), config)
}

/// Runs the engine on an explicit parameter record.
///
/// `config` only contributes presentation settings here.
///
/// # Errors
///
/// Returns [`RunError::Forecast`] if the engine rejects the parameters.
pub fn run_parameters(
    parameters: ForecastParameters,
    config: &ScenarioConfig,
) -> Result<ForecastRun, RunError> {
    if parameters.k_bu < parameters.n0_bu {
        warn!(
            k_bu = parameters.k_bu,
            n0_bu = parameters.n0_bu,
            "carrying capacity below installed base; logistic device curve decays"
        );
    }

    debug!(?parameters, "running forecast");
    let result = forecast(&parameters)?;

    let non_finite = result.non_finite_years();
    if let Some(first) = non_finite.first() {
        warn!(
            first_year = first,
            years = non_finite.len(),
            "forecast overflowed; non-finite values in result"
        );
    }

    let summary = ForecastSummary::from_result(&result, &parameters, config.output.unit);
    info!(
        start_year = summary.start_year,
        end_year = summary.end_year,
        years = summary.years,
        "forecast complete"
    );

    Ok(ForecastRun {
        parameters,
        result,
        summary,
    })
}
