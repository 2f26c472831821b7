//! Integration tests for the Chartsense pipeline.

use std::io::Write;
use tempfile::NamedTempFile;

use chartsense::analysis::aggregate_groups;
use chartsense::render::DataPoint;
use chartsense::{
    aggregate_data, get_recommendations, process_data, row, validate_chart, AggregationMethod,
    ChartConfig, ChartType, Chartsense, ChartsenseError, ColumnType, ExplorerUpdate, Row,
    Severity, Value,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn sales_rows() -> Vec<Row> {
    vec![
        row([("region", Value::from("A")), ("sales", Value::from(10))]),
        row([("region", Value::from("B")), ("sales", Value::from(20))]),
        row([("region", Value::from("A")), ("sales", Value::from(30))]),
    ]
}

// =============================================================================
// End-to-end Tests
// =============================================================================

#[test]
fn test_region_sales_end_to_end() {
    let rows = sales_rows();
    let analysis = process_data(&rows).expect("rows present");

    assert_eq!(analysis.row_count, 3);
    assert_eq!(analysis.column("region").unwrap().column_type(), ColumnType::Category);
    assert_eq!(analysis.column("sales").unwrap().column_type(), ColumnType::Number);

    let totals = aggregate_data(&rows, "region", "sales", AggregationMethod::Sum, None);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0]["region"], Value::from("A"));
    assert_eq!(totals[0]["sales"], Value::Number(40.0));
    assert_eq!(totals[1]["region"], Value::from("B"));
    assert_eq!(totals[1]["sales"], Value::Number(20.0));
}

#[test]
fn test_analyze_csv_file() {
    let file = create_test_file(
        "order_date,region,unit_price,quantity\n\
         2024-01-05,North,\"$1,200\",3\n\
         2024-01-06,South,$950,5\n\
         2024-01-07,North,$1100,\n\
         2024-01-08,East,$700,8\n\
         2024-01-09,South,$990,4\n",
        ".csv",
    );

    let report = Chartsense::new()
        .analyze_file(file.path())
        .expect("Analysis failed");

    assert_eq!(report.source.format, "csv");
    assert!(report.source.hash.starts_with("sha256:"));
    assert_eq!(report.source.row_count, 5);

    let analysis = &report.analysis;
    let types: Vec<ColumnType> = analysis.columns.iter().map(|c| c.column_type()).collect();
    assert_eq!(
        types,
        vec![ColumnType::Date, ColumnType::Category, ColumnType::Number, ColumnType::Number]
    );
    assert_eq!(analysis.column("unit_price").unwrap().label(), "Unit Price");
    assert_eq!(analysis.data[0]["unit_price"], Value::Number(1200.0));
    assert_eq!(analysis.column("quantity").unwrap().stats.null_count, 1);

    assert!(!report.recommendations.is_empty());
    assert!(report.recommendations.len() <= 4);
    assert_eq!(report.recommendations[0].chart_type, ChartType::Scatter);
    assert!(report
        .recommendations
        .iter()
        .any(|c| c.chart_type == ChartType::Line && c.score == Some(90.0)));
    assert_eq!(report.correlations.columns, vec!["unit_price", "quantity"]);
}

#[test]
fn test_analyze_json_file() {
    let file = create_test_file(
        r#"[{"city":"Oslo","temp":4.5,"rainy":true},
            {"city":"Rome","temp":"18"},
            {"city":"Lima","temp":null,"rainy":false}]"#,
        ".json",
    );

    let report = Chartsense::new().analyze_file(file.path()).unwrap();
    assert_eq!(report.source.format, "json");

    let analysis = &report.analysis;
    assert_eq!(analysis.column_keys(), vec!["city", "temp", "rainy"]);
    assert_eq!(analysis.column("temp").unwrap().column_type(), ColumnType::Number);
    assert_eq!(analysis.data[1]["temp"], Value::Number(18.0));
    assert_eq!(analysis.data[1]["rainy"], Value::Null);
    assert_eq!(analysis.data[0]["rainy"], Value::from("true"));
}

#[test]
fn test_header_only_file_is_empty() {
    let file = create_test_file("a,b,c\n", ".csv");
    let err = Chartsense::new().analyze_file(file.path()).unwrap_err();
    assert!(matches!(err, ChartsenseError::EmptyData(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Chartsense::new()
        .analyze_file("/definitely/not/here.csv")
        .unwrap_err();
    assert!(matches!(err, ChartsenseError::Io { .. }));
}

#[test]
fn test_spreadsheet_file_is_unsupported() {
    let file = create_test_file("PK not really a workbook", ".xlsx");
    let err = Chartsense::new().analyze_file(file.path()).unwrap_err();
    assert!(matches!(err, ChartsenseError::UnsupportedFormat(_)));
}

#[test]
fn test_report_wire_format() {
    let rows = sales_rows();
    let analysis = process_data(&rows).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["rowCount"], 3);
    assert_eq!(json["columns"][0]["key"], "region");
    assert_eq!(json["columns"][0]["type"], "category");
    assert_eq!(json["columns"][0]["label"], "Region");
    assert_eq!(json["columns"][0]["stats"]["uniqueCount"], 2);
    assert_eq!(json["columns"][0]["stats"]["top"][0]["val"], "A");
    assert_eq!(json["columns"][0]["stats"]["top"][0]["count"], 2);
    assert!(json["columns"][1]["stats"]["stdDev"].as_f64().unwrap() > 0.0);
    assert_eq!(json["columns"][1]["stats"]["nullCount"], 0);

    let charts = get_recommendations(&analysis.data, &analysis.columns);
    let json = serde_json::to_value(&charts).unwrap();
    assert!(json[0].get("xAxis").is_some());
    assert!(json[0].get("type").is_some());
}

// =============================================================================
// Recommendation Tests
// =============================================================================

#[test]
fn test_strong_correlation_recommends_scatter() {
    // y is built to have r = 0.85 with x.
    let xc = [-1.5, -0.5, 0.5, 1.5];
    let w = [1.0, -1.0, -1.0, 1.0];
    let r: f64 = 0.85;
    let rows: Vec<Row> = (0..4)
        .map(|i| {
            let y = 10.0 + r * xc[i] / 5f64.sqrt() + (1.0 - r * r).sqrt() * w[i] / 2.0;
            row([("x", Value::from(xc[i] + 2.5)), ("y", Value::from(y))])
        })
        .collect();

    let analysis = process_data(&rows).unwrap();
    let charts = get_recommendations(&analysis.data, &analysis.columns);
    let scatter = charts
        .iter()
        .find(|c| c.chart_type == ChartType::Scatter)
        .expect("scatter recommended");

    assert!((scatter.score.unwrap() - 95.5).abs() < 1e-6);
    assert!(scatter
        .description
        .as_deref()
        .unwrap()
        .contains("Strong positive correlation (r=0.85)"));
    assert_eq!(charts[0].chart_type, ChartType::Scatter);
}

#[test]
fn test_date_column_gives_one_line_per_numeric() {
    let rows: Vec<Row> = (1..=12)
        .map(|m| {
            row([
                ("month", Value::from(format!("2023-{:02}-01", m))),
                ("revenue", Value::from(m * 100 + (m % 3) * 7)),
            ])
        })
        .collect();

    let analysis = process_data(&rows).unwrap();
    let charts = get_recommendations(&analysis.data, &analysis.columns);
    let lines: Vec<&ChartConfig> = charts
        .iter()
        .filter(|c| c.chart_type == ChartType::Line)
        .collect();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].score, Some(90.0));
    assert_eq!(lines[0].x_axis, "month");
    assert_eq!(lines[0].title.as_deref(), Some("Revenue over Month"));
}

#[test]
fn test_bubble_uses_third_numeric_column() {
    let rows: Vec<Row> = (0..20)
        .map(|i| {
            row([
                ("height", Value::from(150 + i)),
                ("weight", Value::from(50 + i * 2)),
                ("age", Value::from(20 + (i * 7) % 13)),
            ])
        })
        .collect();

    let analysis = process_data(&rows).unwrap();
    let charts = get_recommendations(&analysis.data, &analysis.columns);

    assert_eq!(charts[0].chart_type, ChartType::Scatter);
    let bubble = charts
        .iter()
        .find(|c| c.chart_type == ChartType::Bubble)
        .expect("bubble recommended");
    assert_eq!(bubble.x_axis, "height");
    assert_eq!(bubble.y_axis, "weight");
    assert_eq!(bubble.size_axis.as_deref(), Some("age"));
    assert_eq!(bubble.title.as_deref(), Some("Height vs Weight sized by Age"));
    assert!((bubble.score.unwrap() - 95.0).abs() < 1e-9);
}

// =============================================================================
// Validation and Exploration Tests
// =============================================================================

#[test]
fn test_documented_validation_cases() {
    let rows: Vec<Row> = (0..30)
        .map(|i| {
            row([
                ("id", Value::from(i)),
                ("amount", Value::from(i * 3)),
                ("kind", Value::from(["a", "b", "c", "d", "e", "f", "g"][i % 7])),
            ])
        })
        .collect();
    let analysis = process_data(&rows).unwrap();
    let id = analysis.column("id");
    let amount = analysis.column("amount");
    let kind = analysis.column("kind");

    let result = validate_chart(ChartType::Scatter, amount, kind);
    assert!(!result.valid);
    assert_eq!(result.severity, Some(Severity::Block));

    let result = validate_chart(ChartType::Pie, kind, amount);
    assert_eq!(result.severity, Some(Severity::Block));
    assert!(result.reason.unwrap().contains("Too many slices"));

    assert_eq!(id.unwrap().cardinality(), 30);
    let result = validate_chart(ChartType::Bar, id, amount);
    assert_eq!(result.severity, Some(Severity::AutoFix));
    assert_eq!(result.suggested_type, Some(ChartType::Scatter));
}

#[test]
fn test_exploration_session() {
    let engine = Chartsense::new();
    let analysis = engine.process_data(&sales_rows()).unwrap();

    let start = ChartConfig::new(ChartType::Pie, "region", "sales");
    assert!(engine.validate(&analysis, start.chart_type, "region", "sales").valid);

    let t = engine.explore(&analysis, &start, ExplorerUpdate::XAxis("sales".into()));
    assert_eq!(t.config.chart_type, ChartType::Scatter);
    assert!(t.hint.is_some());

    let t = engine.explore(&analysis, &t.config, ExplorerUpdate::XAxis("region".into()));
    assert_eq!(t.config.chart_type, ChartType::Bar);
    assert_eq!(t.config.aggregation, Some(AggregationMethod::Mean));

    let data = engine.chart_data(&analysis, &t.config).unwrap();
    // Equal means keep first-seen order.
    assert_eq!(data.labels, vec!["A", "B"]);
    assert_eq!(
        data.datasets[0].points,
        vec![DataPoint::Value(20.0), DataPoint::Value(20.0)]
    );
}

#[test]
fn test_aggregate_limit_zero_means_all() {
    let rows = sales_rows();
    assert_eq!(aggregate_groups(&rows, "region", "sales", AggregationMethod::Count, Some(0)).len(), 2);
    assert_eq!(aggregate_groups(&rows, "region", "sales", AggregationMethod::Count, Some(1)).len(), 1);
}
