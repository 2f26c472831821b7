//! API request handlers.

mod analysis;
mod charts;
mod data;

pub use analysis::*;
pub use charts::*;
pub use data::*;
