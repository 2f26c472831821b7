//! Chart validation and smart-default rules.
//!
//! Both functions are pure: they look only at column types and statistics,
//! never at row data.

use serde::{Deserialize, Serialize};

use crate::schema::{AggregationMethod, ChartType, ColumnInfo, ColumnType};

use super::result::ValidationResult;

/// Maximum slices a pie or doughnut chart may show.
pub const MAX_PIE_SLICES: usize = 6;

/// Distinct X values above which bar charts are reduced to the top items.
pub const MAX_BAR_ITEMS: usize = 20;

/// Check a chart type against its axes. The first matching rule wins.
pub fn validate_chart(
    chart_type: ChartType,
    x: Option<&ColumnInfo>,
    y: Option<&ColumnInfo>,
) -> ValidationResult {
    let (Some(x), Some(y)) = (x, y) else {
        return ValidationResult::block("Select axes first");
    };

    let both_numeric = x.is_numeric() && y.is_numeric();

    if both_numeric {
        return if chart_type == ChartType::Scatter {
            ValidationResult::ok()
        } else {
            ValidationResult::auto_fix(
                ChartType::Scatter,
                "Both axes are numeric. Switched to a scatter plot to show their relationship.",
            )
        };
    }

    match chart_type {
        ChartType::Scatter => {
            ValidationResult::block("Scatter plots require both axes to be numeric.")
        }
        radial if radial.is_radial() => validate_radial(x, y),
        ChartType::Bar => validate_bar(x),
        ChartType::Line => {
            if x.column_type().is_temporal() || x.is_numeric() {
                ValidationResult::ok()
            } else {
                ValidationResult::block("Line charts require Date or Numeric X-axis.")
                    .with_suggestion(ChartType::Bar)
            }
        }
        // Bubble charts are unconstrained once both axes are set.
        _ => ValidationResult::ok(),
    }
}

fn validate_radial(x: &ColumnInfo, y: &ColumnInfo) -> ValidationResult {
    if x.is_numeric() {
        return ValidationResult::block("Pie charts require a categorical X-axis.");
    }
    if y.numeric_min().is_some_and(|min| min < 0.0) {
        return ValidationResult::block("Pie charts cannot display negative values.")
            .with_suggestion(ChartType::Bar);
    }
    let slices = x.cardinality();
    if slices > MAX_PIE_SLICES {
        return ValidationResult::block(format!(
            "Too many slices ({}). Pie charts work best with {} or fewer categories.",
            slices, MAX_PIE_SLICES
        ))
        .with_suggestion(ChartType::Bar);
    }
    ValidationResult::ok()
}

fn validate_bar(x: &ColumnInfo) -> ValidationResult {
    let distinct = x.cardinality();
    if distinct <= MAX_BAR_ITEMS {
        return ValidationResult::ok();
    }
    if x.is_numeric() {
        ValidationResult::auto_fix(
            ChartType::Scatter,
            format!(
                "X-axis has {} distinct numeric values. Switched to a scatter plot.",
                distinct
            ),
        )
    } else {
        ValidationResult::warn(format!(
            "X-axis has {} unique values; the chart will show Top {} items.",
            distinct, MAX_BAR_ITEMS
        ))
    }
}

/// Default chart for a pair of axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub aggregation: Option<AggregationMethod>,
}

/// Suggest a default chart for the chosen axes, if any fits.
pub fn suggest_smart_config(x: &ColumnInfo, y: &ColumnInfo) -> Option<SmartConfig> {
    if !y.is_numeric() {
        return None;
    }

    let (chart_type, aggregation) = match x.column_type() {
        ColumnType::Number => (ChartType::Scatter, None),
        ColumnType::Date => (ChartType::Line, Some(AggregationMethod::Mean)),
        ColumnType::Category | ColumnType::Text => (ChartType::Bar, Some(AggregationMethod::Mean)),
    };

    Some(SmartConfig {
        chart_type,
        aggregation,
    })
}
