//! Chartsense: automatic chart recommendation for tabular data.
//!
//! Chartsense looks at a table of loosely typed rows, decides what each
//! column holds and suggests the charts most likely to be informative.
//!
//! # Core Principles
//!
//! - **Stateless**: every analysis takes its input explicitly and returns a fresh result
//! - **Non-destructive**: input rows are never modified
//! - **Graceful**: degenerate data yields defined fallback values, not errors
//!
//! # Example
//!
//! ```
//! use chartsense::{process_data, get_recommendations, row, ChartType, Value};
//!
//! let rows = vec![
//!     row([("region", Value::from("A")), ("sales", Value::from(10))]),
//!     row([("region", Value::from("B")), ("sales", Value::from(20))]),
//!     row([("region", Value::from("A")), ("sales", Value::from(30))]),
//! ];
//!
//! let analysis = process_data(&rows).unwrap();
//! let charts = get_recommendations(&analysis.data, &analysis.columns);
//!
//! assert!(charts.iter().any(|c| c.chart_type == ChartType::Bar));
//! ```

pub mod analysis;
pub mod error;
pub mod explore;
pub mod inference;
pub mod input;
pub mod recommend;
pub mod render;
pub mod schema;
pub mod validation;

mod chartsense;

pub use crate::chartsense::{get_recommendations, process_data, Chartsense, ChartsenseConfig, Report};
pub use analysis::{aggregate_data, calculate_correlation, sample_data};
pub use error::{ChartsenseError, Result};
pub use explore::{ExplorerUpdate, Transition};
pub use inference::{analyze_column_type, calculate_stats, parse_value, DateParser, FormatDateParser};
pub use input::{row, Row, SourceMetadata, Value};
pub use render::{ChartData, RenderThresholds};
pub use schema::{
    AggregationMethod, AnalysisResult, ChartConfig, ChartType, ColumnInfo, ColumnMetadata,
    ColumnStats, ColumnType,
};
pub use validation::{suggest_smart_config, validate_chart, Severity, SmartConfig, ValidationResult};
