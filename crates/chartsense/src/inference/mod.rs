//! Type inference and per-column statistics.

mod classifier;
mod dates;
mod statistics;

use once_cell::sync::Lazy;

use crate::input::{Row, Value};
use crate::schema::{ColumnMetadata, ColumnType};

pub use classifier::{is_numeric_like, InferenceConfig, TypeInferrer};
pub use dates::{DateParser, FormatDateParser};
pub use statistics::{calculate_stats, TOP_VALUES};

pub(crate) use statistics::median_in_place;

static DEFAULT_INFERRER: Lazy<TypeInferrer> = Lazy::new(TypeInferrer::new);

/// Classify a column with default thresholds and month-first dates.
pub fn analyze_column_type(rows: &[Row], key: &str) -> ColumnMetadata {
    DEFAULT_INFERRER.analyze_column_type(rows, key)
}

/// Parse a raw value with default settings.
pub fn parse_value(raw: &Value, column_type: ColumnType) -> Value {
    DEFAULT_INFERRER.parse_value(raw, column_type)
}
