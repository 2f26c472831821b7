//! Chart recommendation from column types and statistics.

mod engine;

pub use engine::{RecommendationConfig, RecommendationEngine};
