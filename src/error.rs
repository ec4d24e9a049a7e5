//! Error types for forecast invocations.

use thiserror::Error;

/// Reasons a forecast cannot be produced for a parameter set.
///
/// Overflow inside the curves is not an error: it surfaces as non-finite
/// values in the result (see [`crate::model::types::ForecastResult::is_finite`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// A parameter is outside the domain the formulas are defined on.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on [`crate::model::params::ForecastParameters`].
        field: &'static str,
        /// Human-readable constraint description.
        reason: String,
    },

    /// The horizon ends before it starts.
    #[error("degenerate horizon: end_year {end_year} is before start_year {start_year}")]
    DegenerateHorizon {
        /// First forecast year.
        start_year: i32,
        /// Last forecast year (inclusive).
        end_year: i32,
    },
}

impl ForecastError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;
