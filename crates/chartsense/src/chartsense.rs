//! Main Chartsense struct and public API.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{correlation_matrix, CorrelationMatrix};
use crate::error::{ChartsenseError, Result};
use crate::explore::{reduce, ExplorerUpdate, Transition};
use crate::inference::{calculate_stats, DateParser, InferenceConfig, TypeInferrer};
use crate::input::{Parser, ParserConfig, Row, SourceMetadata, Value};
use crate::recommend::{RecommendationConfig, RecommendationEngine};
use crate::render::{build_chart_data, ChartData, RenderThresholds};
use crate::schema::{AnalysisResult, ChartConfig, ChartType, ColumnInfo, ColumnMetadata};
use crate::validation::{suggest_smart_config, validate_chart, SmartConfig, ValidationResult};

/// Configuration for Chartsense analysis.
#[derive(Debug, Clone, Default)]
pub struct ChartsenseConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Type inference thresholds.
    pub inference: InferenceConfig,
    /// Recommendation thresholds and result cap.
    pub recommendation: RecommendationConfig,
    /// Chart data size limits.
    pub render: RenderThresholds,
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Typed rows, column metadata and statistics.
    pub analysis: AnalysisResult,
    /// Ranked chart recommendations.
    pub recommendations: Vec<ChartConfig>,
    /// Pairwise correlations between numeric columns.
    pub correlations: CorrelationMatrix,
}

/// The main Chartsense analysis engine.
///
/// Holds configuration only; every method takes its input explicitly and
/// returns a fresh result.
#[derive(Debug, Clone)]
pub struct Chartsense {
    config: ChartsenseConfig,
    parser: Parser,
    inferrer: TypeInferrer,
    recommender: RecommendationEngine,
}

impl Chartsense {
    /// Create a new Chartsense instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ChartsenseConfig::default())
    }

    /// Create a Chartsense instance with custom configuration.
    pub fn with_config(config: ChartsenseConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let inferrer = TypeInferrer::with_config(config.inference.clone());
        let recommender = RecommendationEngine::with_config(config.recommendation.clone());

        Self {
            config,
            parser,
            inferrer,
            recommender,
        }
    }

    /// Use a different strategy for reading date strings.
    pub fn with_date_parser(mut self, dates: Arc<dyn DateParser>) -> Self {
        self.inferrer = self.inferrer.with_date_parser(dates);
        self
    }

    /// Infer column types, re-parse every cell and compute statistics.
    ///
    /// Column keys come from the first row; cells missing from later rows
    /// become `Null`. Returns `None` when there are no rows.
    pub fn process_data(&self, rows: &[Row]) -> Option<AnalysisResult> {
        let first = rows.first()?;

        let metadata: Vec<ColumnMetadata> = first
            .keys()
            .map(|key| self.inferrer.analyze_column_type(rows, key))
            .collect();

        let data: Vec<Row> = rows
            .iter()
            .map(|row| {
                metadata
                    .iter()
                    .map(|meta| {
                        let value = row
                            .get(&meta.key)
                            .map(|raw| self.inferrer.parse_value(raw, meta.column_type))
                            .unwrap_or(Value::Null);
                        (meta.key.clone(), value)
                    })
                    .collect()
            })
            .collect();

        let columns: Vec<ColumnInfo> = metadata
            .into_iter()
            .map(|meta| {
                let stats =
                    calculate_stats(data.iter().map(|row| &row[meta.key.as_str()]), meta.column_type);
                ColumnInfo::new(meta, stats)
            })
            .collect();

        info!(rows = data.len(), columns = columns.len(), "processed dataset");

        Some(AnalysisResult {
            row_count: data.len(),
            data,
            columns,
        })
    }

    /// Ranked chart recommendations for an analyzed dataset.
    pub fn recommend(&self, analysis: &AnalysisResult) -> Vec<ChartConfig> {
        self.recommender.recommend(&analysis.data, &analysis.columns)
    }

    /// Validate a chart type for two column keys. Unknown keys count as missing.
    pub fn validate(
        &self,
        analysis: &AnalysisResult,
        chart_type: ChartType,
        x_key: &str,
        y_key: &str,
    ) -> ValidationResult {
        validate_chart(chart_type, analysis.column(x_key), analysis.column(y_key))
    }

    /// Smart default chart for two column keys.
    pub fn suggest(
        &self,
        analysis: &AnalysisResult,
        x_key: &str,
        y_key: &str,
    ) -> Result<Option<SmartConfig>> {
        let x = analysis.require_column(x_key)?;
        let y = analysis.require_column(y_key)?;
        Ok(suggest_smart_config(x, y))
    }

    /// Apply one explorer edit to a chart configuration.
    pub fn explore(
        &self,
        analysis: &AnalysisResult,
        prev: &ChartConfig,
        update: ExplorerUpdate,
    ) -> Transition {
        reduce(prev, update, &analysis.columns)
    }

    /// Prepare plot-ready data for a chart.
    pub fn chart_data(&self, analysis: &AnalysisResult, config: &ChartConfig) -> Result<ChartData> {
        build_chart_data(config, analysis, &self.config.render)
    }

    /// Parse a file, analyze it and recommend charts.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<Report> {
        let path = path.as_ref();

        let (dataset, source) = self.parser.parse_file(path)?;
        let analysis = self.process_data(&dataset.rows).ok_or_else(|| {
            ChartsenseError::EmptyData(format!("no data rows in {}", path.display()))
        })?;
        let recommendations = self.recommend(&analysis);
        let correlations = correlation_matrix(&analysis);

        info!(
            file = %source.file,
            rows = analysis.row_count,
            recommendations = recommendations.len(),
            "analyzed file"
        );

        Ok(Report {
            source,
            analysis,
            recommendations,
            correlations,
        })
    }
}

impl Default for Chartsense {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_ENGINE: Lazy<Chartsense> = Lazy::new(Chartsense::new);

/// Analyze rows with the default configuration.
pub fn process_data(rows: &[Row]) -> Option<AnalysisResult> {
    DEFAULT_ENGINE.process_data(rows)
}

/// Recommend charts for typed rows with the default configuration.
pub fn get_recommendations(rows: &[Row], columns: &[ColumnInfo]) -> Vec<ChartConfig> {
    RecommendationEngine::new().recommend(rows, columns)
}
