//! Example: Analyze a tabular data file with Chartsense.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;
use std::path::Path;

use chartsense::{Chartsense, ColumnType};

fn main() -> chartsense::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Chartsense Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let report = Chartsense::new().analyze_file(path)?;

    println!("## Source");
    println!("  File: {}", report.source.file);
    println!("  Format: {}", report.source.format);
    println!("  Rows: {}", report.source.row_count);
    println!("  Columns: {}", report.source.column_count);
    println!();

    println!("## Columns");
    for col in &report.analysis.columns {
        let detail = match col.column_type() {
            ColumnType::Number => col
                .stats
                .numeric()
                .map(|s| format!("min={} max={} mean={:.2}", s.min, s.max, s.mean))
                .unwrap_or_default(),
            _ => format!("unique={}", col.cardinality()),
        };
        println!(
            "  {:20} {:10} nulls={:<5} {}",
            col.label(),
            col.column_type().label(),
            col.stats.null_count,
            detail
        );
    }
    println!();

    println!("## Recommended charts");
    for (i, chart) in report.recommendations.iter().enumerate() {
        println!(
            "  {}. [{:>5.1}] {:8} {}",
            i + 1,
            chart.rank(),
            chart.chart_type.label(),
            chart.title.as_deref().unwrap_or("")
        );
        if let Some(description) = &chart.description {
            println!("             {}", description);
        }
    }

    Ok(())
}
