//! Response normalization for loosely-typed model output.
//!
//! Models asked for a JSON list often answer with prose around it
//! ("Here are the relevant questions: [...] Let me know..."). [`normalize`]
//! recovers the list when it can and otherwise hands back the original text,
//! flagged as degraded. It never fails.
//!
//! # Bracket slicing
//!
//! Text input is cut from the FIRST `[` to the LAST `]` of the whole string,
//! inclusive. Brackets inside string literals are not special. A payload
//! with two independent bracketed regions is therefore sliced across both and
//! usually fails to parse. Callers rely on exactly this behavior; keep it.

use serde_json::Value;
use thiserror::Error;

/// Model output as received from a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Already-deserialized data
    Structured(Value),
    /// Free-form text that may embed a serialized list
    Text(String),
}

impl From<String> for RawResponse {
    fn from(text: String) -> Self {
        RawResponse::Text(text)
    }
}

impl From<&str> for RawResponse {
    fn from(text: &str) -> Self {
        RawResponse::Text(text.to_string())
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        RawResponse::Structured(value)
    }
}

/// Why a response could not be reconciled into structured form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    #[error("no '[' ... ']' pair found")]
    NoBracketPair,

    #[error("bracketed content is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("structured value is not a sequence or mapping")]
    NotStructured,
}

/// Result of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// A JSON array or object
    Structured(Value),
    /// The untouched original text, with the reason it could not be parsed
    Degraded { text: String, reason: DegradeReason },
}

impl Normalized {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Normalized::Degraded { .. })
    }

    pub fn degrade_reason(&self) -> Option<&DegradeReason> {
        match self {
            Normalized::Structured(_) => None,
            Normalized::Degraded { reason, .. } => Some(reason),
        }
    }
}

impl From<Normalized> for RawResponse {
    fn from(normalized: Normalized) -> Self {
        match normalized {
            Normalized::Structured(value) => RawResponse::Structured(value),
            Normalized::Degraded { text, .. } => RawResponse::Text(text),
        }
    }
}

/// Reconcile a model response into structured form.
///
/// - `Structured` arrays and objects are returned unchanged.
/// - `Structured` strings are treated as text.
/// - Other structured scalars are degraded with [`DegradeReason::NotStructured`].
/// - Text is sliced from the first `[` to the last `]` and parsed as JSON.
pub fn normalize(raw: RawResponse) -> Normalized {
    match raw {
        RawResponse::Structured(value @ (Value::Array(_) | Value::Object(_))) => {
            Normalized::Structured(value)
        }
        RawResponse::Structured(Value::String(text)) | RawResponse::Text(text) => {
            normalize_text(text)
        }
        RawResponse::Structured(other) => Normalized::Degraded {
            text: other.to_string(),
            reason: DegradeReason::NotStructured,
        },
    }
}

fn normalize_text(text: String) -> Normalized {
    let Some(slice) = bracketed_slice(&text) else {
        return Normalized::Degraded {
            text,
            reason: DegradeReason::NoBracketPair,
        };
    };

    match serde_json::from_str::<Value>(slice) {
        Ok(value) => Normalized::Structured(value),
        Err(e) => Normalized::Degraded {
            reason: DegradeReason::InvalidJson(e.to_string()),
            text,
        },
    }
}

/// First `[` through last `]`, inclusive.
fn bracketed_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_list_from_surrounding_prose() {
        let result = normalize(r#"noise [{"question":"a"}] trailing"#.into());
        assert_eq!(result, Normalized::Structured(json!([{"question": "a"}])));
    }

    #[test]
    fn test_clean_json_text() {
        let result = normalize(r#"[{"question":"a"},{"question":"b"}]"#.into());
        assert_eq!(
            result,
            Normalized::Structured(json!([{"question": "a"}, {"question": "b"}]))
        );
    }

    #[test]
    fn test_markdown_fenced_list() {
        let text = "Sure!\n```json\n[\"x\", \"y\"]\n```\n";
        assert_eq!(normalize(text.into()), Normalized::Structured(json!(["x", "y"])));
    }

    #[test]
    fn test_no_brackets_returns_original_text() {
        let text = "I could not find any relevant sub-questions.";
        assert_eq!(
            normalize(text.into()),
            Normalized::Degraded {
                text: text.to_string(),
                reason: DegradeReason::NoBracketPair,
            }
        );
    }

    #[test]
    fn test_bare_object_without_brackets_is_degraded() {
        let text = r#"{"question":"a"}"#;
        let result = normalize(text.into());
        assert_eq!(result.degrade_reason(), Some(&DegradeReason::NoBracketPair));
    }

    #[test]
    fn test_close_before_open_is_degraded() {
        let text = "] reversed [";
        let result = normalize(text.into());
        assert_eq!(
            result,
            Normalized::Degraded {
                text: text.to_string(),
                reason: DegradeReason::NoBracketPair,
            }
        );
    }

    #[test]
    fn test_invalid_json_returns_original_text() {
        let text = "result: [{question: a}] done";
        match normalize(text.into()) {
            Normalized::Degraded { text: t, reason } => {
                assert_eq!(t, text);
                assert!(matches!(reason, DegradeReason::InvalidJson(_)));
            }
            other => panic!("expected degraded, got {other:?}"),
        }
    }

    // Boundary: first '[' to last ']' spans two independent regions.
    #[test]
    fn test_multiple_bracket_regions_are_sliced_across() {
        let text = r#"[{"question":"a"}] see also [ref]"#;
        let result = normalize(text.into());
        assert!(result.is_degraded());
        assert!(matches!(
            result.degrade_reason(),
            Some(DegradeReason::InvalidJson(_))
        ));
    }

    // Boundary: brackets inside string literals are not treated specially,
    // which here happens to still cover the whole array.
    #[test]
    fn test_brackets_inside_strings_are_not_special() {
        let text = r#"out: [{"question":"what is a[0]?"}]"#;
        assert_eq!(
            normalize(text.into()),
            Normalized::Structured(json!([{"question": "what is a[0]?"}]))
        );

        // A trailing stray ']' inside prose extends the slice past the array.
        let text = r#"[{"question":"a"}] (done]"#;
        assert!(normalize(text.into()).is_degraded());
    }

    #[test]
    fn test_structured_input_is_returned_unchanged() {
        let list = json!([{"question": "a"}]);
        assert_eq!(
            normalize(RawResponse::Structured(list.clone())),
            Normalized::Structured(list)
        );

        let map = json!({"question": "a"});
        assert_eq!(
            normalize(RawResponse::Structured(map.clone())),
            Normalized::Structured(map)
        );
    }

    #[test]
    fn test_normalize_is_idempotent_on_structured_input() {
        for value in [json!([{"question": "a"}]), json!({"k": [1, 2]}), json!([])] {
            let once = normalize(RawResponse::Structured(value));
            let twice = normalize(once.clone().into());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_normalize_is_idempotent_on_degraded_text() {
        let once = normalize("no list here".into());
        let twice = normalize(once.clone().into());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_structured_string_is_parsed_as_text() {
        let raw = RawResponse::Structured(json!(r#"x [1, 2] y"#));
        assert_eq!(normalize(raw), Normalized::Structured(json!([1, 2])));
    }

    #[test]
    fn test_structured_scalar_is_degraded() {
        let result = normalize(RawResponse::Structured(json!(42)));
        assert_eq!(
            result,
            Normalized::Degraded {
                text: "42".to_string(),
                reason: DegradeReason::NotStructured,
            }
        );
    }

    #[test]
    fn test_multibyte_text_around_list() {
        let text = "回答: [\"é\"] — fin";
        assert_eq!(normalize(text.into()), Normalized::Structured(json!(["é"])));
    }
}
