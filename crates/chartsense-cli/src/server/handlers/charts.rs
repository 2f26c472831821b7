//! Chart validation, smart default, exploration and data handlers.

use axum::{extract::State, Json};
use chartsense::render::ChartData;
use chartsense::{
    ChartConfig, ChartType, ExplorerUpdate, SmartConfig, Transition, ValidationResult,
};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body naming a chart type and its axes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
}

/// POST /api/validate
pub async fn validate_chart(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidationResult>, ApiError> {
    let report = state.report.read().await;
    let result = state
        .engine
        .validate(&report.analysis, req.chart_type, &req.x_axis, &req.y_axis);
    Ok(Json(result))
}

/// Request body naming two axes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub x_axis: String,
    pub y_axis: String,
}

/// POST /api/suggest
pub async fn suggest_chart(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<Option<SmartConfig>>, ApiError> {
    let report = state.report.read().await;
    let smart = state.engine.suggest(&report.analysis, &req.x_axis, &req.y_axis)?;
    Ok(Json(smart))
}

/// Request body for one explorer edit.
#[derive(Deserialize)]
pub struct ExploreRequest {
    pub config: ChartConfig,
    pub update: ExplorerUpdate,
}

/// POST /api/explore
pub async fn explore_chart(
    State(state): State<AppState>,
    Json(req): Json<ExploreRequest>,
) -> Result<Json<Transition>, ApiError> {
    let report = state.report.read().await;
    let transition = state.engine.explore(&report.analysis, &req.config, req.update);
    Ok(Json(transition))
}

/// POST /api/chart
pub async fn chart_data(
    State(state): State<AppState>,
    Json(config): Json<ChartConfig>,
) -> Result<Json<ChartData>, ApiError> {
    let report = state.report.read().await;
    let data = state.engine.chart_data(&report.analysis, &config)?;
    Ok(Json(data))
}
