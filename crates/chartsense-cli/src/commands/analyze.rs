//! Analyze command - infer column types and statistics and recommend charts.

use std::path::PathBuf;

use chartsense::{ColumnInfo, ColumnType};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    day_first: bool,
    sample_size: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine(day_first, sample_size, None);

    if !json {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = super::load(&engine, &file)?;

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} rows, {} columns ({})",
        report.source.row_count.to_string().white().bold(),
        report.source.column_count.to_string().white().bold(),
        report.source.format
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for col in &report.analysis.columns {
        println!(
            "  {:24} {:10} {}",
            col.label(),
            type_label(col.column_type()),
            describe(col, verbose)
        );
    }

    let pairs = report.correlations.strongest_pairs();
    let notable: Vec<_> = pairs.iter().filter(|(_, _, r)| r.abs() >= 0.3).collect();
    if !notable.is_empty() {
        println!();
        println!("{}", "Correlations:".yellow().bold());
        for (a, b, r) in notable.iter().take(5) {
            println!("  {} / {}: {:.2}", a, b, r);
        }
    }

    println!();
    println!("{}", "Recommended charts:".yellow().bold());
    if report.recommendations.is_empty() {
        println!("  {}", "No charts to recommend for this data.".dimmed());
    }
    for (i, chart) in report.recommendations.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            format!("[{}]", chart.chart_type).cyan(),
            chart.title.as_deref().unwrap_or_default().white().bold()
        );
        if verbose {
            if let Some(ref description) = chart.description {
                println!("     {} (score {:.1})", description, chart.rank());
            }
        }
    }

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn type_label(column_type: ColumnType) -> colored::ColoredString {
    match column_type {
        ColumnType::Number => column_type.label().green(),
        ColumnType::Date => column_type.label().blue(),
        ColumnType::Category => column_type.label().magenta(),
        ColumnType::Text => column_type.label().normal(),
    }
}

fn describe(col: &ColumnInfo, verbose: bool) -> String {
    let nulls = if col.stats.null_count > 0 {
        format!(", {} empty", col.stats.null_count)
    } else {
        String::new()
    };

    if let Some(n) = col.stats.numeric() {
        let mut text = format!("{} to {}, mean {:.2}{}", n.min, n.max, n.mean, nulls);
        if verbose {
            text.push_str(&format!(", median {:.2}, sd {:.2}", n.median, n.std_dev));
        }
        return text;
    }
    if let Some(t) = col.stats.temporal() {
        return format!("{} to {}{}", t.min, t.max, nulls);
    }
    if let Some(f) = col.stats.frequency() {
        let top: Vec<String> = f
            .top
            .iter()
            .take(if verbose { 10 } else { 3 })
            .map(|e| format!("{} ({})", e.val, e.count))
            .collect();
        return format!("{} distinct: {}{}", f.unique_count, top.join(", "), nulls);
    }
    "no data".to_string()
}
