//! Column metadata and per-column statistics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::input::Value;
use super::types::ColumnType;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel-case regex"));

/// Turn a raw column key into a display label.
///
/// Underscores become spaces, camelCase is split, and every word is
/// capitalized: `total_sales` and `totalSales` both become `Total Sales`.
pub fn humanize_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let spaced = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Inferred identity of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column key as it appears in the row records.
    pub key: String,
    /// Inferred column type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Human-readable label derived from the key.
    pub label: String,
}

impl ColumnMetadata {
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        let key = key.into();
        let label = humanize_label(&key);
        Self {
            key,
            column_type,
            label,
        }
    }
}

/// Statistics for numeric columns (population statistics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub sum: f64,
    pub std_dev: f64,
    pub variance: f64,
    /// Number of distinct valid values.
    pub unique_count: usize,
}

/// One entry of a value frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub val: Value,
    pub count: usize,
}

/// Statistics for category and text columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyStats {
    /// True number of distinct valid values.
    pub unique_count: usize,
    /// Most frequent values, descending by count (at most 10).
    pub top: Vec<FrequencyEntry>,
}

/// Statistics for date columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalStats {
    pub min: Value,
    pub max: Value,
    /// Number of distinct valid dates.
    pub unique_count: usize,
}

/// Type-specific part of a column's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatsSummary {
    Numeric(NumericStats),
    Frequency(FrequencyStats),
    Temporal(TemporalStats),
}

/// Statistics computed for a column.
///
/// `summary` is `None` when the column has no valid values; callers must
/// read that as "no data", never as zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub null_count: usize,
    #[serde(flatten)]
    pub summary: Option<StatsSummary>,
}

impl ColumnStats {
    /// Statistics for a column with no valid values.
    pub fn empty(null_count: usize) -> Self {
        Self {
            null_count,
            summary: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }

    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.summary {
            Some(StatsSummary::Numeric(s)) => Some(s),
            _ => None,
        }
    }

    pub fn frequency(&self) -> Option<&FrequencyStats> {
        match &self.summary {
            Some(StatsSummary::Frequency(s)) => Some(s),
            _ => None,
        }
    }

    pub fn temporal(&self) -> Option<&TemporalStats> {
        match &self.summary {
            Some(StatsSummary::Temporal(s)) => Some(s),
            _ => None,
        }
    }

    /// Distinct valid values, or `None` when there is no data.
    pub fn unique_count(&self) -> Option<usize> {
        match &self.summary {
            Some(StatsSummary::Numeric(s)) => Some(s.unique_count),
            Some(StatsSummary::Frequency(s)) => Some(s.unique_count),
            Some(StatsSummary::Temporal(s)) => Some(s.unique_count),
            None => None,
        }
    }
}

/// Column metadata together with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    #[serde(flatten)]
    pub metadata: ColumnMetadata,
    pub stats: ColumnStats,
}

impl ColumnInfo {
    pub fn new(metadata: ColumnMetadata, stats: ColumnStats) -> Self {
        Self { metadata, stats }
    }

    pub fn key(&self) -> &str {
        &self.metadata.key
    }

    pub fn label(&self) -> &str {
        &self.metadata.label
    }

    pub fn column_type(&self) -> ColumnType {
        self.metadata.column_type
    }

    pub fn is_numeric(&self) -> bool {
        self.metadata.column_type.is_numeric()
    }

    /// Distinct valid values; zero when the column has no data.
    pub fn cardinality(&self) -> usize {
        self.stats.unique_count().unwrap_or(0)
    }

    /// Minimum of a numeric column.
    pub fn numeric_min(&self) -> Option<f64> {
        self.stats.numeric().map(|s| s.min)
    }

    /// Variance of a numeric column, zero when there is no data.
    pub fn variance(&self) -> f64 {
        self.stats.numeric().map(|s| s.variance).unwrap_or(0.0)
    }
}
