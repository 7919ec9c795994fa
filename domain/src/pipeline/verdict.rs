//! Classification gate verdict

use serde::{Deserialize, Serialize};

/// Token the classifier emits for mathematical/theoretical questions.
const DIRECT_TOKEN: &str = "TRUE";

/// Routing decision produced once per pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationVerdict {
    /// Answer directly, without retrieval
    MathOrTheory,
    /// Run the full retrieval pipeline
    General,
}

impl ClassificationVerdict {
    /// Interpret the classifier's raw text.
    ///
    /// The text is trimmed and upper-cased, then compared with `TRUE`.
    /// Anything else (including `""`, `"MAYBE"` or a sentence containing
    /// "true") is [`ClassificationVerdict::General`].
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().to_uppercase() == DIRECT_TOKEN {
            ClassificationVerdict::MathOrTheory
        } else {
            ClassificationVerdict::General
        }
    }

    /// True if the question takes the direct-answer path.
    pub fn is_direct(&self) -> bool {
        matches!(self, ClassificationVerdict::MathOrTheory)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationVerdict::MathOrTheory => "math_or_theory",
            ClassificationVerdict::General => "general",
        }
    }
}

impl std::fmt::Display for ClassificationVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationVerdict::MathOrTheory => write!(f, "mathematical/theoretical"),
            ClassificationVerdict::General => write!(f, "general"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_variants_route_direct() {
        for raw in ["TRUE", "true", "True", " true ", "\tTRUE\n"] {
            assert_eq!(
                ClassificationVerdict::from_raw(raw),
                ClassificationVerdict::MathOrTheory,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_everything_else_is_general() {
        for raw in ["FALSE", "false", "", "   ", "MAYBE", "TRUE.", "It is TRUE", "T RUE"] {
            assert_eq!(
                ClassificationVerdict::from_raw(raw),
                ClassificationVerdict::General,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_is_direct() {
        assert!(ClassificationVerdict::MathOrTheory.is_direct());
        assert!(!ClassificationVerdict::General.is_direct());
    }
}
