//! Interactive chart exploration.
//!
//! [`reduce`] turns one user edit into the next chart configuration. The
//! previous configuration is never modified. Axis edits consult the smart
//! defaults and switch the chart type when the current one no longer fits;
//! chart-type and aggregation edits are applied as given and only reported
//! through the validation result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{AggregationMethod, ChartConfig, ChartType, ColumnInfo};
use crate::validation::{suggest_smart_config, validate_chart, ValidationResult};

/// A single edit made in the chart explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExplorerUpdate {
    XAxis(String),
    YAxis(String),
    ChartType(ChartType),
    Aggregation(Option<AggregationMethod>),
}

impl ExplorerUpdate {
    fn changes_axis(&self) -> bool {
        matches!(self, ExplorerUpdate::XAxis(_) | ExplorerUpdate::YAxis(_))
    }
}

/// Outcome of applying an [`ExplorerUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub config: ChartConfig,
    pub validation: ValidationResult,
    /// User-facing note when the chart type was switched automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Apply one explorer edit to `prev`.
pub fn reduce(prev: &ChartConfig, update: ExplorerUpdate, columns: &[ColumnInfo]) -> Transition {
    let auto_correct = update.changes_axis();
    let mut next = prev.clone();

    match update {
        ExplorerUpdate::XAxis(key) => next.x_axis = key,
        ExplorerUpdate::YAxis(key) => next.y_axis = key,
        ExplorerUpdate::ChartType(chart_type) => next.chart_type = chart_type,
        ExplorerUpdate::Aggregation(method) => next.aggregation = method,
    }

    let x = find(columns, &next.x_axis);
    let y = find(columns, &next.y_axis);
    let mut hint = None;

    if auto_correct {
        if let (Some(x_col), Some(y_col)) = (x, y) {
            let current = validate_chart(next.chart_type, x, y);
            let suggestion = suggest_smart_config(x_col, y_col);

            if let Some(smart) = suggestion.filter(|_| !current.valid || current.is_auto_fix()) {
                if smart.chart_type != next.chart_type {
                    hint = Some(format!(
                        "Switched to a {} chart for {} and {}.",
                        smart.chart_type.label(),
                        x_col.label(),
                        y_col.label()
                    ));
                }
                debug!(from = %next.chart_type, to = %smart.chart_type, "auto-corrected chart type");
                next.chart_type = smart.chart_type;
                if smart.aggregation.is_some() {
                    next.aggregation = smart.aggregation;
                }
            }
        }
    }

    if next.chart_type != ChartType::Bubble {
        next.size_axis = None;
    }

    let validation = validate_chart(next.chart_type, x, y);

    Transition {
        config: next,
        validation,
        hint,
    }
}

fn find<'a>(columns: &'a [ColumnInfo], key: &str) -> Option<&'a ColumnInfo> {
    columns.iter().find(|c| c.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::calculate_stats;
    use crate::input::{row, Row, Value};
    use crate::schema::{ColumnMetadata, ColumnType};
    use crate::validation::Severity;
    use chrono::NaiveDate;

    fn columns() -> Vec<ColumnInfo> {
        let rows: Vec<Row> = (0..10)
            .map(|i| {
                let day = NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap();
                row([
                    ("region", Value::from(["North", "South"][i % 2])),
                    ("day", Value::from(day)),
                    ("sales", Value::from(i * 10)),
                    ("units", Value::from(i)),
                ])
            })
            .collect();
        [
            ("region", ColumnType::Category),
            ("day", ColumnType::Date),
            ("sales", ColumnType::Number),
            ("units", ColumnType::Number),
        ]
        .into_iter()
        .map(|(key, t)| {
            let stats = calculate_stats(rows.iter().map(|r| &r[key]), t);
            ColumnInfo::new(ColumnMetadata::new(key, t), stats)
        })
        .collect()
    }

    #[test]
    fn test_numeric_x_switches_bar_to_scatter() {
        let cols = columns();
        let prev = ChartConfig::new(ChartType::Bar, "region", "sales")
            .with_aggregation(AggregationMethod::Sum);
        let t = reduce(&prev, ExplorerUpdate::XAxis("units".into()), &cols);

        assert_eq!(t.config.chart_type, ChartType::Scatter);
        assert_eq!(t.config.aggregation, Some(AggregationMethod::Sum));
        assert!(t.validation.valid);
        assert!(t.hint.unwrap().contains("scatter"));
        assert_eq!(prev.chart_type, ChartType::Bar);
    }

    #[test]
    fn test_date_x_switches_pie_to_line() {
        let cols = columns();
        let prev = ChartConfig::new(ChartType::Pie, "region", "sales");
        let t = reduce(&prev, ExplorerUpdate::XAxis("day".into()), &cols);

        assert_eq!(t.config.chart_type, ChartType::Line);
        assert_eq!(t.config.aggregation, Some(AggregationMethod::Mean));
        assert!(t.hint.is_some());
    }

    #[test]
    fn test_valid_choice_is_kept() {
        let cols = columns();
        let prev = ChartConfig::new(ChartType::Pie, "day", "sales");
        let t = reduce(&prev, ExplorerUpdate::XAxis("region".into()), &cols);

        assert_eq!(t.config.chart_type, ChartType::Pie);
        assert!(t.hint.is_none());
        assert!(t.validation.valid);
    }

    #[test]
    fn test_chart_type_edit_never_corrects() {
        let cols = columns();
        let prev = ChartConfig::new(ChartType::Scatter, "sales", "units");
        let t = reduce(&prev, ExplorerUpdate::ChartType(ChartType::Line), &cols);

        assert_eq!(t.config.chart_type, ChartType::Line);
        assert_eq!(t.validation.severity, Some(Severity::AutoFix));
        assert!(t.hint.is_none());
    }

    #[test]
    fn test_unknown_axis_blocks() {
        let cols = columns();
        let prev = ChartConfig::new(ChartType::Bar, "region", "sales");
        let t = reduce(&prev, ExplorerUpdate::YAxis("missing".into()), &cols);

        assert_eq!(t.config.chart_type, ChartType::Bar);
        assert!(t.validation.is_blocked());
    }

    #[test]
    fn test_update_wire_format() {
        let update: ExplorerUpdate =
            serde_json::from_str(r#"{"field":"xAxis","value":"region"}"#).unwrap();
        assert_eq!(update, ExplorerUpdate::XAxis("region".into()));
        let update: ExplorerUpdate =
            serde_json::from_str(r#"{"field":"chartType","value":"doughnut"}"#).unwrap();
        assert_eq!(update, ExplorerUpdate::ChartType(ChartType::Doughnut));
    }
}
