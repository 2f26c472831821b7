//! Data paging and replacement handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use chartsense::analysis::correlation_matrix;
use chartsense::{Row, SourceMetadata, Value};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Maximum number of rows returned per page.
const MAX_PAGE_ROWS: usize = 100;

/// Source name reported for datasets posted to `/api/dataset`.
const POSTED_DATASET_NAME: &str = "posted-dataset.json";

/// Query parameters for paging through typed rows.
#[derive(Deserialize)]
pub struct PageQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of typed rows.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPageResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub offset: usize,
    pub total_rows: usize,
    pub truncated: bool,
}

/// GET /api/data
pub async fn get_data_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DataPageResponse>, ApiError> {
    let report = state.report.read().await;
    let analysis = &report.analysis;

    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(MAX_PAGE_ROWS).min(MAX_PAGE_ROWS);
    let total_rows = analysis.data.len();
    if offset > total_rows {
        return Err(ApiError::NotFound(format!(
            "Offset {} is past the last row ({})",
            offset, total_rows
        )));
    }

    let rows: Vec<Row> = analysis.data.iter().skip(offset).take(limit).cloned().collect();
    let truncated = offset + rows.len() < total_rows;

    Ok(Json(DataPageResponse {
        columns: analysis.column_keys().into_iter().map(String::from).collect(),
        rows,
        offset,
        total_rows,
        truncated,
    }))
}

/// Request body for replacing the dataset.
#[derive(Deserialize)]
pub struct DatasetRequest {
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Summary after replacing the dataset.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetResponse {
    pub row_count: usize,
    pub column_count: usize,
    pub recommendations: usize,
}

/// POST /api/dataset
pub async fn replace_dataset(
    State(state): State<AppState>,
    Json(req): Json<DatasetRequest>,
) -> Result<Json<DatasetResponse>, ApiError> {
    let body = serde_json::to_vec(&req.rows).map_err(|e| ApiError::Chartsense(e.into()))?;
    let rows: Vec<Row> = req
        .rows
        .into_iter()
        .map(|record| record.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
        .collect();

    let analysis = state
        .engine
        .process_data(&rows)
        .ok_or_else(|| ApiError::BadRequest("Dataset has no rows".to_string()))?;
    let recommendations = state.engine.recommend(&analysis);
    let correlations = correlation_matrix(&analysis);

    let source = SourceMetadata::in_memory(
        POSTED_DATASET_NAME,
        &body,
        "json",
        analysis.row_count,
        analysis.columns.len(),
    );

    let mut report = state.report.write().await;
    report.source = source;

    let response = DatasetResponse {
        row_count: analysis.row_count,
        column_count: analysis.columns.len(),
        recommendations: recommendations.len(),
    };

    report.analysis = analysis;
    report.recommendations = recommendations;
    report.correlations = correlations;

    info!(rows = response.row_count, "replaced dataset");
    Ok(Json(response))
}
