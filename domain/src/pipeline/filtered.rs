//! Filtered question set

use super::normalizer::Normalized;
use super::records::FilteredQuestion;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Output of the sub-question filter after normalization.
///
/// Consumers must handle both variants. A degraded set carries the filter's
/// original text; retrieval may legitimately produce nothing for it.
#[derive(Debug, Clone, PartialEq)]
pub enum FilteredQuestionSet {
    Structured(Vec<FilteredQuestion>),
    Degraded(String),
}

impl Default for FilteredQuestionSet {
    fn default() -> Self {
        FilteredQuestionSet::Structured(Vec::new())
    }
}

impl FilteredQuestionSet {
    /// Build the set from a normalized filter response.
    ///
    /// Returns the set and the number of array entries that were dropped
    /// because they carried no usable `question`.
    pub fn from_normalized(normalized: Normalized) -> (Self, usize) {
        match normalized {
            Normalized::Structured(Value::Array(items)) => {
                let total = items.len();
                let records: Vec<_> = items
                    .iter()
                    .filter_map(FilteredQuestion::from_value)
                    .collect();
                let dropped = total - records.len();
                (FilteredQuestionSet::Structured(records), dropped)
            }
            Normalized::Structured(value @ Value::Object(_)) => {
                match FilteredQuestion::from_value(&value) {
                    Some(record) => (FilteredQuestionSet::Structured(vec![record]), 0),
                    None => (FilteredQuestionSet::Degraded(value.to_string()), 0),
                }
            }
            Normalized::Structured(other) => (FilteredQuestionSet::Degraded(other.to_string()), 0),
            Normalized::Degraded { text, .. } => (FilteredQuestionSet::Degraded(text), 0),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FilteredQuestionSet::Degraded(_))
    }

    /// Number of structured records (0 when degraded).
    pub fn len(&self) -> usize {
        match self {
            FilteredQuestionSet::Structured(records) => records.len(),
            FilteredQuestionSet::Degraded(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Question texts of the structured records, in order.
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        let records: &[FilteredQuestion] = match self {
            FilteredQuestionSet::Structured(records) => records,
            FilteredQuestionSet::Degraded(_) => &[],
        };
        records.iter().map(|r| r.question.as_str())
    }
}

impl Serialize for FilteredQuestionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilteredQuestionSet::Structured(records) => records.serialize(serializer),
            FilteredQuestionSet::Degraded(text) => serializer.serialize_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalizer::{DegradeReason, normalize};
    use serde_json::json;

    #[test]
    fn test_structured_array_of_records() {
        let normalized = normalize(r#"[{"question":"sub-question A"}]"#.into());
        let (set, dropped) = FilteredQuestionSet::from_normalized(normalized);
        assert_eq!(dropped, 0);
        assert_eq!(set.questions().collect::<Vec<_>>(), vec!["sub-question A"]);
        assert!(!set.is_degraded());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let normalized = Normalized::Structured(json!(["a", {"question": "a"}]));
        let (set, _) = FilteredQuestionSet::from_normalized(normalized);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_non_conforming_entries_are_dropped_and_counted() {
        let normalized = Normalized::Structured(json!([{"question": "a"}, 7, {"q": "b"}]));
        let (set, dropped) = FilteredQuestionSet::from_normalized(normalized);
        assert_eq!(set.len(), 1);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_single_object_becomes_one_record() {
        let normalized = Normalized::Structured(json!({"question": "a", "score": 1}));
        let (set, _) = FilteredQuestionSet::from_normalized(normalized);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_object_without_question_is_degraded() {
        let normalized = Normalized::Structured(json!({"items": []}));
        let (set, _) = FilteredQuestionSet::from_normalized(normalized);
        assert_eq!(set, FilteredQuestionSet::Degraded(r#"{"items":[]}"#.to_string()));
    }

    #[test]
    fn test_degraded_keeps_original_text() {
        let normalized = Normalized::Degraded {
            text: "nothing relevant".to_string(),
            reason: DegradeReason::NoBracketPair,
        };
        let (set, _) = FilteredQuestionSet::from_normalized(normalized);
        assert_eq!(set, FilteredQuestionSet::Degraded("nothing relevant".to_string()));
        assert!(set.is_empty());
        assert_eq!(set.questions().count(), 0);
    }

    #[test]
    fn test_serialization_shapes() {
        let set = FilteredQuestionSet::Structured(vec![FilteredQuestion::new("a")]);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!([{"question": "a"}]));

        let set = FilteredQuestionSet::Degraded("raw".to_string());
        assert_eq!(serde_json::to_value(&set).unwrap(), json!("raw"));

        assert_eq!(
            serde_json::to_value(FilteredQuestionSet::default()).unwrap(),
            json!([])
        );
    }
}
