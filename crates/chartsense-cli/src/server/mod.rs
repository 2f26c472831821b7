//! HTTP server for interactive chart exploration.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
