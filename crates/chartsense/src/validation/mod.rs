//! Chart validation and smart defaults.

mod result;
mod rules;

pub use result::{Severity, ValidationResult};
pub use rules::{suggest_smart_config, validate_chart, SmartConfig, MAX_BAR_ITEMS, MAX_PIE_SLICES};
