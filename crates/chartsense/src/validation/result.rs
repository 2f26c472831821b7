//! Validation outcome types.

use serde::{Deserialize, Serialize};

use crate::schema::ChartType;

/// How a caller should treat a chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Disallow the configuration.
    Block,
    /// Allow it, but show the reason as a caveat.
    Warn,
    /// Silently switch to the suggested chart type.
    AutoFix,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Block => "Blocked",
            Severity::Warn => "Warning",
            Severity::AutoFix => "Auto-fix",
        }
    }
}

/// Result of checking a chart type against its axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_type: Option<ChartType>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            severity: None,
            reason: None,
            suggested_type: None,
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            severity: Some(Severity::Block),
            reason: Some(reason.into()),
            suggested_type: None,
        }
    }

    /// Valid, with a caveat for the user.
    pub fn warn(reason: impl Into<String>) -> Self {
        Self {
            valid: true,
            severity: Some(Severity::Warn),
            reason: Some(reason.into()),
            suggested_type: None,
        }
    }

    pub fn auto_fix(suggested: ChartType, reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            severity: Some(Severity::AutoFix),
            reason: Some(reason.into()),
            suggested_type: Some(suggested),
        }
    }

    pub fn with_suggestion(mut self, suggested: ChartType) -> Self {
        self.suggested_type = Some(suggested);
        self
    }

    pub fn is_blocked(&self) -> bool {
        self.severity == Some(Severity::Block)
    }

    pub fn is_auto_fix(&self) -> bool {
        self.severity == Some(Severity::AutoFix)
    }
}
