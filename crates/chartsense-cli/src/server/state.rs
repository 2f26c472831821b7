//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use chartsense::{Chartsense, Report};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Engine configured from the command line.
    pub engine: Arc<Chartsense>,
    /// The dataset being explored and its analysis.
    pub report: Arc<RwLock<Report>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(engine: Chartsense, report: Report) -> Self {
        Self {
            engine: Arc::new(engine),
            report: Arc::new(RwLock::new(report)),
        }
    }
}
