//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ForecastQuery, ForecastResponse};
use crate::model::engine::forecast;
use crate::model::params::ForecastParameters;
use crate::model::summary::ForecastSummary;
use crate::model::types::YearRecord;

/// Returns the parameter record of the loaded scenario.
///
/// `GET /parameters` → 200 + `ForecastParameters` JSON
pub async fn get_parameters(State(state): State<Arc<AppState>>) -> Json<ForecastParameters> {
    Json(state.parameters)
}

/// Returns the summary of the loaded scenario.
///
/// `GET /summary` → 200 + `ForecastSummary` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<ForecastSummary> {
    Json(state.summary.clone())
}

/// Returns year records, optionally filtered by year range.
///
/// `GET /forecast` → 200 + `Vec<YearRecord>` JSON
/// `GET /forecast?from=2026&to=2030` → filtered range (inclusive)
/// `GET /forecast?from=2030&to=2026` → 400 + `ErrorResponse`
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(i32::MIN);
    let to = query.to.unwrap_or(i32::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
                field: None,
            }),
        ));
    }

    let records: Vec<YearRecord> = state.result.range(from, to).copied().collect();
    Ok(Json(records))
}

/// Runs a fresh forecast for the posted parameters.
///
/// `POST /forecast` with `ForecastParameters` JSON → 200 + `ForecastResponse`
/// Invalid parameters → 422 + `ErrorResponse`
pub async fn post_forecast(
    State(state): State<Arc<AppState>>,
    Json(parameters): Json<ForecastParameters>,
) -> impl IntoResponse {
    match forecast(&parameters) {
        Ok(result) => {
            let summary = ForecastSummary::from_result(&result, &parameters, state.summary.unit);
            let non_finite_years = result.non_finite_years();
            if !non_finite_years.is_empty() {
                tracing::warn!(years = non_finite_years.len(), "posted forecast overflowed");
            }
            Ok(Json(ForecastResponse {
                parameters,
                records: result.records().to_vec(),
                summary,
                non_finite_years,
            }))
        }
        Err(err) => {
            tracing::debug!(error = %err, "rejected posted parameters");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::from(&err)),
            ))
        }
    }
}
