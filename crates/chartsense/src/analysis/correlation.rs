//! Pearson correlation.

use serde::{Deserialize, Serialize};

use crate::schema::AnalysisResult;

/// Pearson product-moment correlation of two equal-length series.
///
/// Returns `0.0` when the lengths differ, either series is empty, or either
/// series is constant. The result is symmetric in its arguments.
pub fn calculate_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.is_empty() || is_constant(xs) || is_constant(ys) {
        return 0.0;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (sxy / denominator).clamp(-1.0, 1.0)
}

// Rounding in the mean can leave a constant series with tiny nonzero spread.
fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Pairwise correlations between numeric columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Numeric column keys, in column order.
    pub columns: Vec<String>,
    /// `values[i][j]` is the correlation of `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Off-diagonal pairs ordered by absolute correlation, strongest first.
    pub fn strongest_pairs(&self) -> Vec<(&str, &str, f64)> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                pairs.push((self.columns[i].as_str(), self.columns[j].as_str(), self.values[i][j]));
            }
        }
        pairs.sort_by(|a, b| b.2.abs().total_cmp(&a.2.abs()));
        pairs
    }
}

/// Correlate every pair of numeric columns over rows where both are present.
pub fn correlation_matrix(analysis: &AnalysisResult) -> CorrelationMatrix {
    let columns: Vec<String> = analysis
        .numeric_columns()
        .map(|c| c.key().to_string())
        .collect();

    let k = columns.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        for j in i..k {
            let (xs, ys) = analysis.numeric_pairs(&columns[i], &columns[j]);
            let r = calculate_correlation(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { columns, values }
}
