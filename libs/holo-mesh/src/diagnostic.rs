use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a pipeline diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Info,
}

/// A note about a best-effort step that degraded or was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub step: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn warning(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, step, message)
    }

    pub fn info(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, step, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{level}[{}]: {}", self.step, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_level_and_step() {
        let warning = Diagnostic::warning("albedo", "contrast failed");
        assert_eq!(warning.to_string(), "warning[albedo]: contrast failed");

        let info = Diagnostic::info("extrusion", "used fallback box");
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.to_string(), "info[extrusion]: used fallback box");
    }
}
