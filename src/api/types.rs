//! API response and query types.
//!
//! Non-finite values (overflowed curves) serialize as JSON `null`.

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::model::params::ForecastParameters;
use crate::model::summary::ForecastSummary;
use crate::model::types::YearRecord;

/// Optional year range for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// First year (inclusive).
    pub from: Option<i32>,
    /// Last year (inclusive).
    pub to: Option<i32>,
}

/// Forecast for posted parameters.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    /// Parameters as received.
    pub parameters: ForecastParameters,
    /// Per-year records in ascending year order.
    pub records: Vec<YearRecord>,
    /// Horizon summary.
    pub summary: ForecastSummary,
    /// Years containing at least one non-finite value.
    pub non_finite_years: Vec<i32>,
}

/// Error response body for 4xx-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Offending parameter, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&ForecastError> for ErrorResponse {
    fn from(err: &ForecastError) -> Self {
        let field = match err {
            ForecastError::InvalidParameter { field, .. } => Some((*field).to_string()),
            ForecastError::DegenerateHorizon { .. } => Some("end_year".to_string()),
        };
        Self {
            error: err.to_string(),
            field,
        }
    }
}
