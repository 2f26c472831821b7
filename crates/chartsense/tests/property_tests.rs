//! Property-based tests for the analysis core.
//!
//! These tests use proptest to generate random inputs and verify that the
//! analysis functions keep their invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p chartsense --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p chartsense --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use chartsense::analysis::aggregate_groups;
use chartsense::schema::ColumnMetadata;
use chartsense::{
    analyze_column_type, calculate_correlation, calculate_stats, parse_value, process_data, row,
    sample_data, validate_chart, AggregationMethod, ChartType, ColumnInfo, ColumnType, Row,
    Severity, Value,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

/// Non-constant series of at least two values.
fn varied_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(finite(), 2..60).prop_filter("series must vary", |xs| {
        xs.iter().any(|&x| (x - xs[0]).abs() > 1e-3)
    })
}

/// Raw cell values the way loaders produce them.
fn raw_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::from("")),
        finite().prop_map(Value::from),
        "[a-zA-Z0-9$,.\\-/ ]{0,16}".prop_map(Value::from),
        (2000i32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| Value::from(format!("{}-{:02}-{:02}", y, m, d))),
    ]
}

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop_oneof![
        Just(ColumnType::Number),
        Just(ColumnType::Date),
        Just(ColumnType::Category),
        Just(ColumnType::Text),
    ]
}

fn chart_type() -> impl Strategy<Value = ChartType> {
    prop::sample::select(ChartType::ALL.to_vec())
}

fn grouped_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (prop::option::of("[a-e]"), prop::option::of(finite())),
        0..80,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .map(|(g, m)| row([("group", Value::from(g)), ("metric", Value::from(m))]))
            .collect()
    })
}

// =============================================================================
// Statistics
// =============================================================================

proptest! {
    #[test]
    fn numeric_stats_are_ordered(values in prop::collection::vec(prop::option::of(finite()), 0..100)) {
        let values: Vec<Value> = values.into_iter().map(Value::from).collect();
        let stats = calculate_stats(&values, ColumnType::Number);
        let valid = values.iter().filter(|v| !v.is_null()).count();

        prop_assert_eq!(stats.null_count, values.len() - valid);
        match stats.numeric() {
            Some(n) => {
                prop_assert!(n.min <= n.median && n.median <= n.max);
                prop_assert!(n.variance >= 0.0);
                prop_assert!(n.mean >= n.min - 1e-6 && n.mean <= n.max + 1e-6);
            }
            None => prop_assert_eq!(valid, 0),
        }
    }

    #[test]
    fn frequency_top_is_bounded(values in prop::collection::vec("[a-m]{0,2}", 0..200)) {
        let values: Vec<Value> = values.into_iter().map(Value::from).collect();
        let stats = calculate_stats(&values, ColumnType::Category);
        let valid = values.iter().filter(|v| !v.is_null()).count();

        if let Some(freq) = stats.frequency() {
            let listed: usize = freq.top.iter().map(|e| e.count).sum();
            prop_assert!(freq.top.len() <= 10);
            prop_assert!(listed <= valid);
            prop_assert!(freq.top.windows(2).all(|w| w[0].count >= w[1].count));
            prop_assert!(freq.unique_count >= freq.top.len());
        }
    }

    #[test]
    fn parse_value_never_fails(raw in raw_value(), t in column_type()) {
        let parsed = parse_value(&raw, t);
        if raw.is_empty() {
            prop_assert!(parsed.is_null());
        }
        match t {
            ColumnType::Number => prop_assert!(parsed.is_null() || parsed.as_f64().is_some()),
            ColumnType::Date => prop_assert!(parsed.is_null() || parsed.as_date().is_some()),
            _ => {}
        }
    }

    #[test]
    fn inference_is_deterministic(cells in prop::collection::vec(raw_value(), 0..50)) {
        let rows: Vec<Row> = cells.into_iter().map(|v| row([("c", v)])).collect();
        prop_assert_eq!(analyze_column_type(&rows, "c"), analyze_column_type(&rows, "c"));
    }

    #[test]
    fn processed_rows_carry_every_key(cells in prop::collection::vec((raw_value(), raw_value()), 1..40)) {
        let rows: Vec<Row> = cells
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                if i % 5 == 4 {
                    row([("a", a)])
                } else {
                    row([("a", a), ("b", b)])
                }
            })
            .collect();
        let analysis = process_data(&rows).unwrap();

        prop_assert_eq!(analysis.row_count, rows.len());
        for r in &analysis.data {
            for column in &analysis.columns {
                prop_assert!(r.contains_key(column.key()));
            }
        }
    }
}

// =============================================================================
// Correlation, Aggregation and Sampling
// =============================================================================

proptest! {
    #[test]
    fn self_correlation_is_one(xs in varied_series()) {
        prop_assert!((calculate_correlation(&xs, &xs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_is_symmetric_and_bounded(
        pairs in prop::collection::vec((finite(), finite()), 0..60)
    ) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let ab = calculate_correlation(&a, &b);
        prop_assert_eq!(ab, calculate_correlation(&b, &a));
        prop_assert!((-1.0..=1.0).contains(&ab));
    }

    #[test]
    fn constant_series_correlates_zero(c in finite(), ys in prop::collection::vec(finite(), 0..40)) {
        let xs = vec![c; ys.len()];
        prop_assert_eq!(calculate_correlation(&xs, &ys), 0.0);
    }

    #[test]
    fn aggregation_is_bounded_and_sorted(
        rows in grouped_rows(),
        limit in prop::option::of(0usize..6),
        method in prop::sample::select(vec![
            AggregationMethod::Mean,
            AggregationMethod::Sum,
            AggregationMethod::Count,
            AggregationMethod::Median,
        ]),
    ) {
        let buckets = aggregate_groups(&rows, "group", "metric", method, limit);
        let groups: HashSet<String> = rows
            .iter()
            .filter(|r| !r["group"].is_null() && !r["metric"].is_null())
            .map(|r| r["group"].to_string())
            .collect();

        prop_assert!(buckets.len() <= groups.len());
        if let Some(l) = limit.filter(|&l| l > 0) {
            prop_assert!(buckets.len() <= l);
        }
        prop_assert!(buckets.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn sampling_returns_distinct_members(n in 0usize..300, limit in 0usize..150) {
        let rows: Vec<usize> = (0..n).collect();
        let sample = sample_data(&rows, limit);

        if n <= limit {
            prop_assert_eq!(sample, rows);
        } else {
            prop_assert_eq!(sample.len(), limit);
            let unique: HashSet<_> = sample.iter().collect();
            prop_assert_eq!(unique.len(), limit);
            prop_assert!(sample.iter().all(|&v| v < n));
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

fn column_with(key: &str, t: ColumnType, values: &[Value]) -> ColumnInfo {
    ColumnInfo::new(ColumnMetadata::new(key, t), calculate_stats(values, t))
}

proptest! {
    #[test]
    fn validation_is_total(
        t in chart_type(),
        xt in column_type(),
        yt in column_type(),
        values in prop::collection::vec(raw_value(), 0..40),
        drop_x in any::<bool>(),
    ) {
        let typed_x: Vec<Value> = values.iter().map(|v| parse_value(v, xt)).collect();
        let typed_y: Vec<Value> = values.iter().map(|v| parse_value(v, yt)).collect();
        let x = column_with("x", xt, &typed_x);
        let y = column_with("y", yt, &typed_y);

        let result = validate_chart(t, (!drop_x).then_some(&x), Some(&y));

        if drop_x {
            prop_assert_eq!(result.severity, Some(Severity::Block));
        }
        match result.severity {
            Some(Severity::AutoFix) => {
                prop_assert!(!result.valid);
                prop_assert!(result.suggested_type.is_some());
            }
            Some(Severity::Block) => prop_assert!(!result.valid),
            Some(Severity::Warn) | None => prop_assert!(result.valid),
        }
        if xt == ColumnType::Number && yt == ColumnType::Number && !drop_x {
            prop_assert!(t == ChartType::Scatter || result.severity == Some(Severity::AutoFix));
        }
    }
}
