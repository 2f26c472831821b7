//! Rule-based chart recommendation.
//!
//! Each rule proposes scored candidate charts from column types and
//! statistics. Candidates are ranked by score, deduplicated by title and
//! capped, so the top of the list is the most informative set of charts
//! for a first look at a dataset.

use std::collections::HashSet;

use tracing::debug;

use crate::analysis::calculate_correlation;
use crate::input::Row;
use crate::schema::{AggregationMethod, ChartConfig, ChartType, ColumnInfo, ColumnType};

/// Thresholds and scores for recommendation rules.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Maximum recommendations returned.
    pub max_results: usize,
    /// Category columns with more distinct values are not compared.
    pub max_category_distinct: usize,
    /// Category columns with at most this many values also get a pie chart.
    pub pie_max_slices: usize,
    /// Minimum |r| for a scatter recommendation.
    pub min_correlation: f64,
    /// |r| above which a correlation is described as strong.
    pub strong_correlation: f64,
    /// Variance above which a distribution chart gets a bonus.
    pub high_variance: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_results: 4,
            max_category_distinct: 50,
            pie_max_slices: 6,
            min_correlation: 0.3,
            strong_correlation: 0.7,
            high_variance: 1000.0,
        }
    }
}

/// Base scores per rule.
const DISTRIBUTION_SCORE: f64 = 50.0;
const HIGH_VARIANCE_BONUS: f64 = 20.0;
const TREND_SCORE: f64 = 90.0;
const PIE_SCORE: f64 = 75.0;
const CATEGORY_BAR_SCORE: f64 = 80.0;
const SCATTER_BASE: f64 = 70.0;
const SCATTER_WEIGHT: f64 = 30.0;
const BUBBLE_BASE: f64 = 85.0;
const BUBBLE_WEIGHT: f64 = 10.0;

/// A numeric pair whose correlation passed the scatter threshold.
struct CorrelatedPair<'a> {
    x: &'a ColumnInfo,
    y: &'a ColumnInfo,
    r: f64,
}

/// Generates chart recommendations from typed rows and column statistics.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Rank, deduplicate by title and cap all candidate charts.
    pub fn recommend(&self, rows: &[Row], columns: &[ColumnInfo]) -> Vec<ChartConfig> {
        let numeric: Vec<&ColumnInfo> = columns.iter().filter(|c| c.is_numeric()).collect();

        let mut candidates = Vec::new();
        candidates.extend(self.distribution_charts(&numeric));
        candidates.extend(self.trend_charts(columns, &numeric));
        candidates.extend(self.category_charts(columns, &numeric));

        let pairs = self.correlated_pairs(rows, &numeric);
        candidates.extend(self.scatter_charts(&pairs));
        candidates.extend(self.bubble_charts(&pairs, &numeric));

        let total = candidates.len();

        // Stable sort: equal scores keep rule order.
        candidates.sort_by(|a, b| b.rank().total_cmp(&a.rank()));

        let mut seen = HashSet::new();
        let recommendations: Vec<ChartConfig> = candidates
            .into_iter()
            .filter(|c| seen.insert(c.title.clone().unwrap_or_default()))
            .take(self.config.max_results)
            .collect();

        debug!(candidates = total, returned = recommendations.len(), "ranked chart recommendations");
        recommendations
    }

    /// A histogram-style bar for every numeric column that varies.
    fn distribution_charts(&self, numeric: &[&ColumnInfo]) -> Vec<ChartConfig> {
        numeric
            .iter()
            .filter_map(|col| {
                let stats = col.stats.numeric()?;
                if stats.std_dev <= 0.0 {
                    return None;
                }
                let bonus = if stats.variance > self.config.high_variance {
                    HIGH_VARIANCE_BONUS
                } else {
                    0.0
                };
                Some(
                    ChartConfig::new(ChartType::Bar, col.key(), col.key())
                        .with_aggregation(AggregationMethod::Count)
                        .with_title(format!("Distribution of {}", col.label()))
                        .with_description(format!(
                            "How {} values are spread across the dataset",
                            col.label()
                        ))
                        .with_score(DISTRIBUTION_SCORE + bonus),
                )
            })
            .collect()
    }

    /// Every numeric column over the first date column.
    fn trend_charts(&self, columns: &[ColumnInfo], numeric: &[&ColumnInfo]) -> Vec<ChartConfig> {
        let Some(date) = columns.iter().find(|c| c.column_type() == ColumnType::Date) else {
            return Vec::new();
        };

        numeric
            .iter()
            .map(|col| {
                ChartConfig::new(ChartType::Line, date.key(), col.key())
                    .with_aggregation(AggregationMethod::Mean)
                    .with_title(format!("{} over {}", col.label(), date.label()))
                    .with_description(format!("Trend of {} over time", col.label()))
                    .with_score(TREND_SCORE)
            })
            .collect()
    }

    /// Bar (and, for few non-negative slices, pie) comparisons per category.
    fn category_charts(&self, columns: &[ColumnInfo], numeric: &[&ColumnInfo]) -> Vec<ChartConfig> {
        let mut charts = Vec::new();

        let categories = columns.iter().filter(|c| {
            c.column_type().is_discrete()
                && c.stats
                    .frequency()
                    .is_some_and(|f| f.unique_count <= self.config.max_category_distinct)
        });

        for category in categories {
            let slices = category.cardinality();
            for col in numeric {
                let non_negative = col.numeric_min().is_some_and(|min| min >= 0.0);
                if slices <= self.config.pie_max_slices && non_negative {
                    charts.push(
                        ChartConfig::new(ChartType::Pie, category.key(), col.key())
                            .with_aggregation(AggregationMethod::Sum)
                            .with_title(format!("{} share by {}", col.label(), category.label()))
                            .with_description(format!(
                                "Share of total {} contributed by each {}",
                                col.label(),
                                category.label()
                            ))
                            .with_score(PIE_SCORE),
                    );
                }

                charts.push(
                    ChartConfig::new(ChartType::Bar, category.key(), col.key())
                        .with_aggregation(AggregationMethod::Mean)
                        .with_title(format!("{} by {}", col.label(), category.label()))
                        .with_description(format!(
                            "Average {} for each {}",
                            col.label(),
                            category.label()
                        ))
                        .with_score(CATEGORY_BAR_SCORE),
                );
            }
        }

        charts
    }

    /// Unordered numeric pairs with |r| at or above the threshold.
    fn correlated_pairs<'a>(&self, rows: &[Row], numeric: &[&'a ColumnInfo]) -> Vec<CorrelatedPair<'a>> {
        let mut pairs = Vec::new();
        for (i, x) in numeric.iter().enumerate() {
            for y in &numeric[i + 1..] {
                let (xs, ys) = numeric_pairs(rows, x.key(), y.key());
                let r = calculate_correlation(&xs, &ys);
                if r.abs() >= self.config.min_correlation {
                    pairs.push(CorrelatedPair { x, y, r });
                }
            }
        }
        pairs
    }

    fn scatter_charts(&self, pairs: &[CorrelatedPair<'_>]) -> Vec<ChartConfig> {
        pairs
            .iter()
            .map(|pair| {
                let strength = if pair.r.abs() > self.config.strong_correlation {
                    "Strong"
                } else {
                    "Moderate"
                };
                let direction = if pair.r > 0.0 { "positive" } else { "negative" };

                ChartConfig::new(ChartType::Scatter, pair.x.key(), pair.y.key())
                    .with_title(format!("{} vs {}", pair.x.label(), pair.y.label()))
                    .with_description(format!(
                        "{} {} correlation (r={:.2})",
                        strength, direction, pair.r
                    ))
                    .with_score(SCATTER_BASE + pair.r.abs() * SCATTER_WEIGHT)
            })
            .collect()
    }

    /// Correlated pairs sized by the first other numeric column that varies.
    fn bubble_charts(&self, pairs: &[CorrelatedPair<'_>], numeric: &[&ColumnInfo]) -> Vec<ChartConfig> {
        pairs
            .iter()
            .filter_map(|pair| {
                let size = numeric.iter().find(|c| {
                    c.key() != pair.x.key() && c.key() != pair.y.key() && c.variance() > 0.0
                })?;

                Some(
                    ChartConfig::new(ChartType::Bubble, pair.x.key(), pair.y.key())
                        .with_size_axis(size.key())
                        .with_title(format!(
                            "{} vs {} sized by {}",
                            pair.x.label(),
                            pair.y.label(),
                            size.label()
                        ))
                        .with_description(format!(
                            "Relationship between {} and {} (r={:.2}) with {} as bubble size",
                            pair.x.label(),
                            pair.y.label(),
                            pair.r,
                            size.label()
                        ))
                        .with_score(BUBBLE_BASE + pair.r.abs() * BUBBLE_WEIGHT),
                )
            })
            .collect()
    }
}

/// Paired finite numbers from two columns of raw rows.
fn numeric_pairs(rows: &[Row], x_key: &str, y_key: &str) -> (Vec<f64>, Vec<f64>) {
    rows.iter()
        .filter_map(|row| Some((row.get(x_key)?.as_f64()?, row.get(y_key)?.as_f64()?)))
        .unzip()
}
