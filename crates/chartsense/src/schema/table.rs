//! Table-level analysis result.

use serde::{Deserialize, Serialize};

use crate::error::{ChartsenseError, Result};
use crate::input::{Row, Value};
use super::column::ColumnInfo;
use super::types::ColumnType;

static NULL: Value = Value::Null;

/// Typed rows plus per-column metadata and statistics.
///
/// Every row carries a value (possibly `Null`) for every column key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Rows re-parsed with each column's inferred type.
    pub data: Vec<Row>,
    /// Column metadata and statistics, in column order.
    pub columns: Vec<ColumnInfo>,
    /// Number of rows analyzed.
    pub row_count: usize,
}

impl AnalysisResult {
    /// Get a column by key.
    pub fn column(&self, key: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Get a column by key, failing for unknown keys.
    pub fn require_column(&self, key: &str) -> Result<&ColumnInfo> {
        self.column(key)
            .ok_or_else(|| ChartsenseError::UnknownColumn(key.to_string()))
    }

    /// Get all column keys.
    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key()).collect()
    }

    /// Columns of a given type, in column order.
    pub fn columns_of_type(&self, column_type: ColumnType) -> impl Iterator<Item = &ColumnInfo> {
        self.columns
            .iter()
            .filter(move |c| c.column_type() == column_type)
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns_of_type(ColumnType::Number)
    }

    /// All values of one column, in row order.
    pub fn column_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.data
            .iter()
            .map(move |row| row.get(key).unwrap_or(&NULL))
    }

    /// Paired finite numbers from two columns, skipping rows where either is missing.
    pub fn numeric_pairs(&self, x_key: &str, y_key: &str) -> (Vec<f64>, Vec<f64>) {
        self.data
            .iter()
            .filter_map(|row| {
                let x = row.get(x_key)?.as_f64()?;
                let y = row.get(y_key)?.as_f64()?;
                Some((x, y))
            })
            .unzip()
    }
}
