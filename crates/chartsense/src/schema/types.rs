//! Core enumerations shared by inference, recommendation and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Inferred semantic type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric measurements.
    Number,
    /// Calendar dates or timestamps.
    Date,
    /// Low-cardinality discrete values.
    Category,
    /// Free text / high-cardinality strings.
    Text,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date)
    }

    /// Category or text columns, i.e. those summarized by value frequency.
    pub fn is_discrete(&self) -> bool {
        matches!(self, ColumnType::Category | ColumnType::Text)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Category => "category",
            ColumnType::Text => "text",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of chart a configuration renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Doughnut,
    Scatter,
    Bubble,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Doughnut,
        ChartType::Scatter,
        ChartType::Bubble,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Scatter => "scatter",
            ChartType::Bubble => "bubble",
        }
    }

    /// Pie and doughnut charts share slice rules.
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Doughnut)
    }

}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "doughnut" | "donut" => Ok(ChartType::Doughnut),
            "scatter" => Ok(ChartType::Scatter),
            "bubble" => Ok(ChartType::Bubble),
            _ => Err(format!(
                "Unknown chart type: {}. Use bar, line, pie, doughnut, scatter or bubble.",
                s
            )),
        }
    }
}

/// How grouped metric values are reduced to one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    Mean,
    Sum,
    Count,
    Median,
}

impl AggregationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AggregationMethod::Mean => "mean",
            AggregationMethod::Sum => "sum",
            AggregationMethod::Count => "count",
            AggregationMethod::Median => "median",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AggregationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "avg" | "average" => Ok(AggregationMethod::Mean),
            "sum" | "total" => Ok(AggregationMethod::Sum),
            "count" => Ok(AggregationMethod::Count),
            "median" => Ok(AggregationMethod::Median),
            _ => Err(format!(
                "Unknown aggregation: {}. Use mean, sum, count or median.",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_parse() {
        assert_eq!("Pie".parse::<ChartType>().unwrap(), ChartType::Pie);
        assert_eq!("donut".parse::<ChartType>().unwrap(), ChartType::Doughnut);
        assert!("radar".parse::<ChartType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ColumnType::Category).unwrap(), "\"category\"");
        assert_eq!(serde_json::to_string(&ChartType::Doughnut).unwrap(), "\"doughnut\"");
        assert_eq!(
            serde_json::from_str::<AggregationMethod>("\"median\"").unwrap(),
            AggregationMethod::Median
        );
    }

    #[test]
    fn test_radial() {
        assert!(ChartType::Pie.is_radial());
        assert!(ChartType::Doughnut.is_radial());
        assert!(!ChartType::Bar.is_radial());
    }
}
