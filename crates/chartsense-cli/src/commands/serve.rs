//! Serve command - expose the analysis over HTTP.

use std::path::PathBuf;

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(file: PathBuf, port: u16, day_first: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine(day_first, None, None);
    let report = super::load(&engine, &file)?;

    println!(
        "{} {} ({} rows, {} columns)",
        "Loaded".green().bold(),
        report.source.file.white(),
        report.analysis.row_count,
        report.analysis.columns.len()
    );

    let state = AppState::new(engine, report);

    let url = format!("http://localhost:{}/api/analysis", port);
    println!();
    println!(
        "{} {}",
        "Starting exploration server at".cyan().bold(),
        url.white().bold()
    );
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}
