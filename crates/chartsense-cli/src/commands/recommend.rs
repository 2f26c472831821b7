//! Recommend command - list recommended charts for a data file.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(
    file: PathBuf,
    json: bool,
    limit: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if limit == Some(0) {
        return Err("--limit must be at least 1".into());
    }

    let engine = super::engine(false, None, limit);
    let report = super::load(&engine, &file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.recommendations)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Recommended charts for".cyan().bold(),
        report.source.file.white()
    );
    println!();

    for (i, chart) in report.recommendations.iter().enumerate() {
        println!(
            "{:>2}. {:8} {}",
            i + 1,
            chart.chart_type.label().cyan(),
            chart.title.as_deref().unwrap_or_default().white().bold()
        );
        let mut axes = format!("x={} y={}", chart.x_axis, chart.y_axis);
        if let Some(ref size) = chart.size_axis {
            axes.push_str(&format!(" size={}", size));
        }
        if let Some(method) = chart.aggregation {
            axes.push_str(&format!(" ({})", method));
        }
        println!("    {}", axes.dimmed());
        if let Some(ref description) = chart.description {
            println!("    {}", description);
        }
        if verbose {
            println!("    score {:.1}", chart.rank());
        }
    }

    if report.recommendations.is_empty() {
        println!("{}", "No charts to recommend for this data.".yellow());
    }

    Ok(())
}
