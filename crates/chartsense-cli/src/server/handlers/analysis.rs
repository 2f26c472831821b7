//! Analysis and recommendation handlers.

use axum::{extract::State, Json};
use chartsense::analysis::CorrelationMatrix;
use chartsense::{ChartConfig, ColumnInfo, SourceMetadata};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Analysis without the typed rows.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub source: SourceMetadata,
    pub columns: Vec<ColumnInfo>,
    pub row_count: usize,
    pub correlations: CorrelationMatrix,
}

/// GET /api/analysis
pub async fn get_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let report = state.report.read().await;

    Ok(Json(AnalysisResponse {
        source: report.source.clone(),
        columns: report.analysis.columns.clone(),
        row_count: report.analysis.row_count,
        correlations: report.correlations.clone(),
    }))
}

/// GET /api/recommendations
pub async fn get_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChartConfig>>, ApiError> {
    let report = state.report.read().await;
    Ok(Json(report.recommendations.clone()))
}
