//! Aggregate command - group rows and reduce a metric column.

use std::path::PathBuf;

use chartsense::analysis::aggregate_groups;
use chartsense::{aggregate_data, AggregationMethod};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    group: String,
    metric: String,
    method: AggregationMethod,
    limit: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine(false, None, None);
    let report = super::load(&engine, &file)?;
    let analysis = &report.analysis;

    let group_col = analysis.require_column(&group)?;
    let metric_col = analysis.require_column(&metric)?;

    if json {
        let rows = aggregate_data(&analysis.data, &group, &metric, method, limit);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let buckets = aggregate_groups(&analysis.data, &group, &metric, method, limit);

    println!(
        "{} of {} by {}",
        method.to_string().cyan().bold(),
        metric_col.label().white().bold(),
        group_col.label().white().bold()
    );
    println!();

    let width = buckets
        .iter()
        .map(|b| b.group.to_string().len())
        .max()
        .unwrap_or(0)
        .max(group_col.label().len());

    for bucket in &buckets {
        println!(
            "  {:width$}  {:>14.2}  {}",
            bucket.group.to_string(),
            bucket.value,
            format!("n={}", bucket.size).dimmed(),
            width = width
        );
    }

    if buckets.is_empty() {
        println!("  {}", "No groups with data.".yellow());
    }

    Ok(())
}
