//! Chart data preparation.
//!
//! Turns a [`ChartConfig`] and an [`AnalysisResult`] into a declarative
//! series that a plotting front end can draw directly. Large inputs are
//! reduced here: scatter series are sampled, bar charts keep their top
//! items and pie charts their largest slices.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{aggregate_groups, sample_data_with_rng, AggregateBucket};
use crate::error::{ChartsenseError, Result};
use crate::input::Value;
use crate::schema::{AggregationMethod, AnalysisResult, ChartConfig, ChartType, ColumnInfo};

/// Size limits applied while preparing chart data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderThresholds {
    /// Point charts with more rows than this are sampled.
    pub scatter_sample_threshold: usize,
    /// Points kept after sampling.
    pub scatter_sample_size: usize,
    /// Maximum bars in a bar chart.
    pub bar_max_items: usize,
    /// Maximum slices in a pie or doughnut chart.
    pub pie_max_slices: usize,
    /// Bins in a distribution histogram.
    pub histogram_bins: usize,
}

impl Default for RenderThresholds {
    fn default() -> Self {
        Self {
            scatter_sample_threshold: 1000,
            scatter_sample_size: 500,
            bar_max_items: 20,
            pie_max_slices: 6,
            histogram_bins: 10,
        }
    }
}

/// Smallest and largest bubble radius.
const BUBBLE_RADIUS: (f64, f64) = (4.0, 20.0);

/// One plotted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    Value(f64),
    Bubble { x: f64, y: f64, r: f64 },
    Xy { x: f64, y: f64 },
}

/// A named series of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<DataPoint>,
}

/// Everything needed to draw one chart.
///
/// Category charts (bar, line, pie, doughnut) pair `labels` with
/// [`DataPoint::Value`] points; scatter and bubble charts leave `labels`
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

/// Prepare chart data with a fresh random generator for sampling.
pub fn build_chart_data(
    config: &ChartConfig,
    analysis: &AnalysisResult,
    thresholds: &RenderThresholds,
) -> Result<ChartData> {
    build_chart_data_with_rng(config, analysis, thresholds, &mut fastrand::Rng::new())
}

/// [`build_chart_data`] with a caller-supplied generator.
pub fn build_chart_data_with_rng(
    config: &ChartConfig,
    analysis: &AnalysisResult,
    thresholds: &RenderThresholds,
    rng: &mut fastrand::Rng,
) -> Result<ChartData> {
    let x = analysis.require_column(&config.x_axis)?;
    let y = analysis.require_column(&config.y_axis)?;

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| format!("{} by {}", y.label(), x.label()));

    let (labels, datasets) = match config.chart_type {
        ChartType::Scatter => (Vec::new(), vec![scatter_series(analysis, x, y, thresholds, rng)]),
        ChartType::Bubble => {
            let key = config.size_axis.as_deref().ok_or_else(|| {
                ChartsenseError::Config("bubble charts need a size axis".to_string())
            })?;
            let size = analysis.require_column(key)?;
            (Vec::new(), vec![bubble_series(analysis, x, y, size, thresholds, rng)])
        }
        ChartType::Bar if x.key() == y.key() && x.is_numeric() => {
            histogram(analysis, x, thresholds.histogram_bins)
        }
        ChartType::Bar => {
            let method = config.aggregation.unwrap_or(AggregationMethod::Mean);
            let buckets = aggregate_groups(
                &analysis.data,
                x.key(),
                y.key(),
                method,
                Some(thresholds.bar_max_items),
            );
            category_series(buckets, y, method)
        }
        ChartType::Pie | ChartType::Doughnut => {
            let method = config.aggregation.unwrap_or(AggregationMethod::Sum);
            let buckets = aggregate_groups(
                &analysis.data,
                x.key(),
                y.key(),
                method,
                Some(thresholds.pie_max_slices),
            );
            category_series(buckets, y, method)
        }
        ChartType::Line => {
            let method = config.aggregation.unwrap_or(AggregationMethod::Mean);
            let mut buckets = aggregate_groups(&analysis.data, x.key(), y.key(), method, None);
            buckets.sort_by(|a, b| axis_order(&a.group, &b.group));
            category_series(buckets, y, method)
        }
    };

    debug!(
        chart = %config.chart_type,
        labels = labels.len(),
        points = datasets.iter().map(|s| s.points.len()).sum::<usize>(),
        "prepared chart data"
    );

    Ok(ChartData {
        chart_type: config.chart_type,
        title,
        labels,
        datasets,
    })
}

fn scatter_series(
    analysis: &AnalysisResult,
    x: &ColumnInfo,
    y: &ColumnInfo,
    thresholds: &RenderThresholds,
    rng: &mut fastrand::Rng,
) -> Series {
    let (xs, ys) = analysis.numeric_pairs(x.key(), y.key());
    let points: Vec<DataPoint> = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| DataPoint::Xy { x, y })
        .collect();

    Series {
        label: format!("{} vs {}", x.label(), y.label()),
        points: thin_points(points, thresholds, rng),
    }
}

fn bubble_series(
    analysis: &AnalysisResult,
    x: &ColumnInfo,
    y: &ColumnInfo,
    size: &ColumnInfo,
    thresholds: &RenderThresholds,
    rng: &mut fastrand::Rng,
) -> Series {
    let triples: Vec<(f64, f64, f64)> = analysis
        .data
        .iter()
        .filter_map(|row| {
            Some((
                row.get(x.key())?.as_f64()?,
                row.get(y.key())?.as_f64()?,
                row.get(size.key())?.as_f64()?,
            ))
        })
        .collect();

    let (lo, hi) = triples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t.2), hi.max(t.2)));
    let (r_min, r_max) = BUBBLE_RADIUS;

    let points = triples
        .into_iter()
        .map(|(x, y, s)| {
            let r = if hi > lo {
                r_min + (s - lo) / (hi - lo) * (r_max - r_min)
            } else {
                (r_min + r_max) / 2.0
            };
            DataPoint::Bubble { x, y, r }
        })
        .collect();

    Series {
        label: format!("{} vs {} sized by {}", x.label(), y.label(), size.label()),
        points: thin_points(points, thresholds, rng),
    }
}

fn thin_points(
    points: Vec<DataPoint>,
    thresholds: &RenderThresholds,
    rng: &mut fastrand::Rng,
) -> Vec<DataPoint> {
    if points.len() > thresholds.scatter_sample_threshold {
        sample_data_with_rng(&points, thresholds.scatter_sample_size, rng)
    } else {
        points
    }
}

/// Equal-width bins over the column's range.
fn histogram(analysis: &AnalysisResult, column: &ColumnInfo, bins: usize) -> (Vec<String>, Vec<Series>) {
    let values: Vec<f64> = analysis
        .column_values(column.key())
        .filter_map(Value::as_f64)
        .collect();
    let series_label = format!("{} (count)", column.label());

    let Some(stats) = column.stats.numeric().filter(|_| !values.is_empty()) else {
        return (Vec::new(), vec![Series { label: series_label, points: Vec::new() }]);
    };

    let (lo, hi) = (stats.min, stats.max);
    let bins = if hi > lo { bins.max(1) } else { 1 };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in values {
        let index = if width > 0.0 {
            (((v - lo) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    let labels = (0..bins)
        .map(|i| {
            let start = lo + width * i as f64;
            let end = if i + 1 == bins { hi } else { start + width };
            format!("{}-{}", format_bound(start), format_bound(end))
        })
        .collect();
    let points = counts.into_iter().map(|c| DataPoint::Value(c as f64)).collect();

    (labels, vec![Series { label: series_label, points }])
}

fn category_series(
    buckets: Vec<AggregateBucket>,
    metric: &ColumnInfo,
    method: AggregationMethod,
) -> (Vec<String>, Vec<Series>) {
    let (labels, points) = buckets
        .into_iter()
        .map(|b| (b.group.to_string(), DataPoint::Value(b.value)))
        .unzip();

    let series = Series {
        label: format!("{} ({})", metric.label(), method),
        points,
    };
    (labels, vec![series])
}

/// Ascending order for dates and numbers; other values keep their order.
fn axis_order(a: &Value, b: &Value) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        _ => Ordering::Equal,
    }
}

fn sort_key(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.timestamp_millis().map(|ms| ms as f64))
}

fn format_bound(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process_data;
    use crate::input::{row, Row};
    use chrono::NaiveDate;

    fn store_name(i: usize) -> String {
        let first = (b'a' + (i / 26) as u8) as char;
        let second = (b'a' + (i % 26) as u8) as char;
        format!("store {}{}", first, second)
    }

    fn sales() -> AnalysisResult {
        let rows: Vec<Row> = (0..30)
            .map(|i| {
                let day = NaiveDate::from_ymd_opt(2024, 3, 30 - i as u32 % 28).unwrap();
                row([
                    ("region", Value::from(["North", "South", "East"][i % 3])),
                    ("store", Value::from(store_name(i))),
                    ("day", Value::from(day.format("%Y-%m-%d").to_string())),
                    ("sales", Value::from(i * 10)),
                    ("units", Value::from(i as f64 / 2.0)),
                    ("margin", Value::from((i % 4) as f64)),
                ])
            })
            .collect();
        process_data(&rows).unwrap()
    }

    #[test]
    fn test_bar_aggregates_and_caps() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Bar, "store", "sales");
        let data = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap();

        assert_eq!(data.labels.len(), 20);
        assert_eq!(data.labels[0], "store bd");
        assert_eq!(data.datasets[0].points[0], DataPoint::Value(290.0));
        assert_eq!(data.title, "Sales by Store");
        assert_eq!(data.datasets[0].label, "Sales (mean)");
    }

    #[test]
    fn test_pie_sums_by_default() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Pie, "region", "sales");
        let data = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap();

        assert_eq!(data.labels, vec!["East", "South", "North"]);
        let total: f64 = data.datasets[0]
            .points
            .iter()
            .map(|p| match p {
                DataPoint::Value(v) => *v,
                _ => 0.0,
            })
            .sum();
        assert_eq!(total, (0..30).map(|i| i as f64 * 10.0).sum::<f64>());
    }

    #[test]
    fn test_line_sorted_by_date() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Line, "day", "sales");
        let data = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap();

        let mut sorted = data.labels.clone();
        sorted.sort();
        assert_eq!(data.labels, sorted);
        assert_eq!(data.labels.len(), 28);
    }

    #[test]
    fn test_histogram_bins() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Bar, "sales", "sales");
        let data = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap();

        assert_eq!(data.labels.len(), 10);
        assert_eq!(data.labels[0], "0-29");
        assert_eq!(data.labels[9], "261-290");
        let counts: Vec<f64> = data.datasets[0]
            .points
            .iter()
            .filter_map(|p| match p {
                DataPoint::Value(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(counts.iter().sum::<f64>(), 30.0);
        assert!(counts.iter().all(|&c| c == 3.0));
    }

    #[test]
    fn test_scatter_sampled_above_threshold() {
        let rows: Vec<Row> = (0..1500)
            .map(|i| row([("a", Value::from(i)), ("b", Value::from(i * 3))]))
            .collect();
        let analysis = process_data(&rows).unwrap();
        let config = ChartConfig::new(ChartType::Scatter, "a", "b");
        let mut rng = fastrand::Rng::with_seed(7);
        let data =
            build_chart_data_with_rng(&config, &analysis, &RenderThresholds::default(), &mut rng)
                .unwrap();

        assert!(data.labels.is_empty());
        assert_eq!(data.datasets[0].points.len(), 500);
    }

    #[test]
    fn test_bubble_radius_range() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Bubble, "sales", "units").with_size_axis("margin");
        let data = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap();

        let radii: Vec<f64> = data.datasets[0]
            .points
            .iter()
            .filter_map(|p| match p {
                DataPoint::Bubble { r, .. } => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 30);
        assert!(radii.iter().all(|r| (4.0..=20.0).contains(r)));
        assert!(radii.contains(&4.0) && radii.contains(&20.0));
    }

    #[test]
    fn test_bubble_without_size_axis_errors() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Bubble, "sales", "units");
        let err = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap_err();
        assert!(matches!(err, ChartsenseError::Config(_)));
    }

    #[test]
    fn test_unknown_column_errors() {
        let analysis = sales();
        let config = ChartConfig::new(ChartType::Bar, "nope", "sales");
        let err = build_chart_data(&config, &analysis, &RenderThresholds::default()).unwrap_err();
        assert!(matches!(err, ChartsenseError::UnknownColumn(_)));
    }
}
