//! Configuration issues.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the pipeline cannot run with this configuration.
    Error,
    /// Non-fatal: the pipeline runs but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required string setting is empty.
    EmptyValue { field: String },
    /// A URL setting does not start with `http://` or `https://`.
    InvalidUrl { field: String, value: String },
    /// A count setting is zero.
    ZeroLimit { field: String },
    /// A referenced file does not exist.
    MissingFile { field: String, path: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_constructors() {
        let issue = ConfigIssue::error(
            ConfigIssueCode::EmptyValue {
                field: "llm.model".to_string(),
            },
            "llm.model cannot be empty",
        );
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: llm.model cannot be empty");

        let issue = ConfigIssue::warning(
            ConfigIssueCode::ZeroLimit {
                field: "x".to_string(),
            },
            "x is zero",
        );
        assert!(!issue.is_error());
        assert_eq!(issue.to_string(), "warning: x is zero");
    }
}
