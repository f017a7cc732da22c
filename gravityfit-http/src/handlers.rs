use axum::extract::{Path, Query, State};
use axum::Json;
use gravityfit_catalog::{PlanetRecord, Stats};
use gravityfit_gravity::{
    intensity_index, validate_alpha, validate_fraction, validate_intensity, Mapping, DEFAULT_ALPHA,
};
use gravityfit_planner::{generate_plan, WeeklyPlan};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

pub const MAX_LIMIT: i64 = 500;
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;
pub const DEFAULT_RANDOM_LIMIT: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    exoplanets: Vec<PlanetRecord>,
    total: usize,
    query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    gravity_fraction: f64,
    #[serde(default = "default_alpha")]
    alpha: f64,
    #[serde(default)]
    mapping: Mapping,
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    intensity_index: u8,
    details: PredictDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictDetails {
    gravity_fraction: f64,
    alpha_used: f64,
    mapping: Mapping,
    formula: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    intensity_index: i64,
    #[serde(default)]
    gravity_fraction: Option<f64>,
}

fn checked_limit(limit: Option<i64>, default: i64) -> Result<usize, ApiError> {
    let limit = limit.unwrap_or(default);
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit as usize)
    } else {
        Err(ApiError::InvalidInput(format!(
            "limit must be within [1, {MAX_LIMIT}], got {limit}"
        )))
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn search_exoplanets(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let limit = checked_limit(params.limit, DEFAULT_SEARCH_LIMIT)?;
    let exoplanets: Vec<PlanetRecord> = {
        let mut rng = state
            .rng
            .lock()
            .map_err(|_| ApiError::Internal("sample rng lock poisoned".into()))?;
        state
            .table
            .search(&params.q, limit, &mut *rng)
            .into_iter()
            .cloned()
            .collect()
    };
    Ok(Json(SearchResponse {
        total: exoplanets.len(),
        exoplanets,
        query: params.q,
    }))
}

pub async fn exoplanet_stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.table.statistics()?))
}

/// Served under `/exoplanets/random` but returns a table-order prefix.
pub async fn first_exoplanets(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<PlanetRecord>>, ApiError> {
    let limit = checked_limit(params.limit, DEFAULT_RANDOM_LIMIT)?;
    Ok(Json(state.table.sample(limit).to_vec()))
}

pub async fn get_exoplanet(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlanetRecord>, ApiError> {
    state
        .table
        .find_by_name(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Exoplanet '{name}' not found")))
}

pub async fn predict(Json(req): Json<PredictRequest>) -> Result<Json<PredictResponse>, ApiError> {
    let g = validate_fraction(req.gravity_fraction)?;
    let alpha = validate_alpha(req.alpha)?;
    Ok(Json(PredictResponse {
        intensity_index: intensity_index(g, alpha, req.mapping),
        details: PredictDetails {
            gravity_fraction: g,
            alpha_used: alpha,
            mapping: req.mapping,
            formula: req.mapping.formula(alpha),
        },
    }))
}

pub async fn plan(Json(req): Json<PlanRequest>) -> Result<Json<WeeklyPlan>, ApiError> {
    let intensity = validate_intensity(req.intensity_index)?;
    let gravity = req.gravity_fraction.map(validate_fraction).transpose()?;
    Ok(Json(generate_plan(intensity, gravity)))
}
