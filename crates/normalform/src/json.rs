//! JSON serialization types for conversion results

use crate::error::{ConversionError, Result};
use crate::horn::HornKind;
use crate::pipeline::{ConversionResult, Step};
use serde::{Deserialize, Serialize};

/// JSON representation of a Horn clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HornJson {
    pub kind: HornKind,
    pub text: String,
}

/// JSON representation of a conversion result
///
/// Every formula is a plain rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJson {
    pub input: String,
    pub kind: String,
    /// `name/arity` strings
    pub predicates: Vec<String>,
    pub steps: Vec<Step>,
    pub pcnf: String,
    pub pdnf: String,
    pub clausal_form: String,
    pub clauses: Vec<String>,
    pub horn: Vec<HornJson>,
    pub non_horn: Vec<String>,
}

impl From<&ConversionResult> for ConversionJson {
    fn from(result: &ConversionResult) -> Self {
        ConversionJson {
            input: result.input.clone(),
            kind: result.kind.to_string(),
            predicates: result.predicates.iter().map(|p| p.to_string()).collect(),
            steps: result.steps.iter().cloned().collect(),
            pcnf: result.pcnf.to_string(),
            pdnf: result.pdnf.to_string(),
            clausal_form: result.clausal_form(),
            clauses: result.clauses.iter().map(|c| c.to_string()).collect(),
            horn: result
                .horn
                .horn
                .iter()
                .map(|h| HornJson {
                    kind: h.kind(),
                    text: h.to_string(),
                })
                .collect(),
            non_horn: result.horn.non_horn.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// JSON representation of a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorJson {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&ConversionError> for ErrorJson {
    fn from(err: &ConversionError) -> Self {
        ErrorJson {
            kind: err.kind().to_string(),
            message: err.to_string(),
            position: err.position(),
        }
    }
}

/// Either a converted formula or the error it failed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeJson {
    Converted(ConversionJson),
    Failed(ErrorJson),
}

impl From<&Result<ConversionResult>> for OutcomeJson {
    fn from(outcome: &Result<ConversionResult>) -> Self {
        match outcome {
            Ok(result) => OutcomeJson::Converted(ConversionJson::from(result)),
            Err(e) => OutcomeJson::Failed(ErrorJson::from(e)),
        }
    }
}

impl OutcomeJson {
    pub fn is_converted(&self) -> bool {
        matches!(self, OutcomeJson::Converted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pipeline::{convert, Converter, EXAMPLES};

    #[test]
    fn test_conversion_json_fields() {
        let result = convert(r"\exists x P(x)").unwrap();
        let json = ConversionJson::from(&result);
        assert_eq!(json.kind, "first-order");
        assert_eq!(json.predicates, vec!["P/1"]);
        assert_eq!(json.clauses, vec!["P(sk1)"]);
        assert_eq!(json.horn, vec![HornJson { kind: HornKind::Fact, text: "P(sk1).".to_string() }]);
        assert!(json.non_horn.is_empty());

        let value = serde_json::to_value(&json).unwrap();
        assert_eq!(value["steps"][0]["label"], "Elimination of Implications/Biconditionals");
        assert_eq!(value["horn"][0]["kind"], "Fact");
        assert_eq!(value["clausal_form"], "{ P(sk1) }");
    }

    #[test]
    fn test_error_json() {
        let err = convert(r"(P \land Q").unwrap_err();
        let json = ErrorJson::from(&err);
        assert_eq!(json.kind, ErrorKind::Syntax.to_string());
        assert_eq!(json.kind, "SyntaxError");
        assert_eq!(json.position, Some(10));

        let text = serde_json::to_string(&ErrorJson::from(&ConversionError::Clausification(
            "x".to_string(),
        )))
        .unwrap();
        assert!(!text.contains("position"));
    }

    #[test]
    fn test_outcomes_serialize_as_one_array() {
        let converter = Converter::default();
        let mut outcomes: Vec<OutcomeJson> = EXAMPLES
            .iter()
            .map(|example| OutcomeJson::from(&converter.convert(example)))
            .collect();
        assert!(outcomes.iter().all(OutcomeJson::is_converted));
        outcomes.push(OutcomeJson::from(&converter.convert("P Q")));
        assert!(!outcomes[EXAMPLES.len()].is_converted());

        let text = serde_json::to_string_pretty(&outcomes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), EXAMPLES.len() + 1);
        assert_eq!(items[0]["input"], EXAMPLES[0]);
        assert_eq!(items[EXAMPLES.len()]["kind"], "SyntaxError");

        let back: Vec<OutcomeJson> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, outcomes);
    }
}
