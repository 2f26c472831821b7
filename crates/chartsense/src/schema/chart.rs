//! Declarative chart configuration.

use serde::{Deserialize, Serialize};

use super::types::{AggregationMethod, ChartType};

/// A chart to render: type, axes and optional presentation details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Kind of chart.
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// Column key plotted on the X axis.
    pub x_axis: String,
    /// Column key plotted on the Y axis.
    pub y_axis: String,
    /// Column key driving bubble size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_axis: Option<String>,
    /// How Y values are reduced per X group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Recommendation ranking score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ChartConfig {
    /// Create a bare chart configuration.
    pub fn new(chart_type: ChartType, x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Self {
            chart_type,
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            size_axis: None,
            aggregation: None,
            title: None,
            description: None,
            score: None,
        }
    }

    pub fn with_size_axis(mut self, key: impl Into<String>) -> Self {
        self.size_axis = Some(key.into());
        self
    }

    pub fn with_aggregation(mut self, method: AggregationMethod) -> Self {
        self.aggregation = Some(method);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Score used for ranking; unscored charts rank last.
    pub fn rank(&self) -> f64 {
        self.score.unwrap_or(f64::NEG_INFINITY)
    }
}
