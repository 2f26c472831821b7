//! Validate command - check a chart type against two columns.

use std::path::PathBuf;

use chartsense::{ChartType, Severity};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    chart: ChartType,
    x: String,
    y: String,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine(false, None, None);
    let report = super::load(&engine, &file)?;
    let analysis = &report.analysis;

    for key in [&x, &y] {
        if analysis.column(key).is_none() {
            return Err(format!(
                "Unknown column '{}'. Available: {}",
                key,
                analysis.column_keys().join(", ")
            )
            .into());
        }
    }

    let result = engine.validate(analysis, chart, &x, &y);
    let verdict = match result.severity {
        None => "OK".green().bold(),
        Some(severity @ Severity::Warn) => severity.label().yellow().bold(),
        Some(severity @ Severity::AutoFix) => severity.label().blue().bold(),
        Some(severity @ Severity::Block) => severity.label().red().bold(),
    };

    println!("{} {} chart of {} by {}", verdict, chart, y, x);
    if let Some(ref reason) = result.reason {
        println!("  {}", reason);
    }
    if let Some(suggested) = result.suggested_type {
        println!("  Suggested type: {}", suggested.to_string().cyan());
    }

    match engine.suggest(analysis, &x, &y)? {
        Some(smart) => {
            let aggregation = smart
                .aggregation
                .map(|m| format!(" with {}", m))
                .unwrap_or_default();
            println!(
                "  Smart default: {}{}",
                smart.chart_type.to_string().cyan(),
                aggregation
            );
        }
        None if verbose => println!("  {}", "No smart default for these axes".dimmed()),
        None => {}
    }

    Ok(())
}
