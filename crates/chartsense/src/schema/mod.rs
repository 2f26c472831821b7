//! Column metadata, statistics and chart enumerations.

mod chart;
mod column;
mod table;
mod types;

pub use chart::ChartConfig;
pub use column::{
    humanize_label, ColumnInfo, ColumnMetadata, ColumnStats, FrequencyEntry, FrequencyStats,
    NumericStats, StatsSummary, TemporalStats,
};
pub use table::AnalysisResult;
pub use types::{AggregationMethod, ChartType, ColumnType};
