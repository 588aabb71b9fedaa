//! JSON encoding of AST nodes
//!
//! Every node is an object whose `"type"` field names the variant. Decoding
//! checks that field before handing the object to serde, so an unknown
//! discriminator is reported by name rather than as a generic serde error.

use super::conformance::Conformance;
use super::expression::Expression;
use super::revision::{range_source, validate_range};
use super::value::ComparisonValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Result type for JSON encoding and decoding
pub type SerializationResult<T> = Result<T, SerializationError>;

/// Errors raised while encoding or decoding AST nodes
#[derive(Error, Debug)]
pub enum SerializationError {
    /// The `"type"` field named no known variant
    #[error("unknown {kind} type \"{type_name}\"")]
    UnknownType {
        /// Node family being decoded (`expression`, `value`, `conformance`)
        kind: &'static str,
        /// Discriminator found in the input
        type_name: String,
    },

    /// The object had no string `"type"` field
    #[error("missing \"type\" field in {kind}")]
    MissingType {
        /// Node family being decoded
        kind: &'static str,
    },

    /// The node decoded but is structurally invalid
    #[error("invalid {kind}: {reason}")]
    Invalid {
        /// Node family being decoded
        kind: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Malformed JSON or a field of the wrong shape
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// JSON codec for a tagged AST node family
pub trait JsonCodec: Serialize + DeserializeOwned {
    /// Family name used in error messages
    const KIND: &'static str;

    /// Accepted `"type"` discriminators
    const KNOWN_TYPES: &'static [&'static str];

    /// Structural checks serde cannot express
    fn validate(&self) -> SerializationResult<()> {
        Ok(())
    }

    /// Encode as a JSON value
    fn to_json_value(&self) -> SerializationResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encode as a JSON string
    fn to_json(&self) -> SerializationResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from a JSON value
    fn from_json_value(value: JsonValue) -> SerializationResult<Self> {
        let type_name = value
            .get("type")
            .and_then(JsonValue::as_str)
            .ok_or(SerializationError::MissingType { kind: Self::KIND })?;
        if !Self::KNOWN_TYPES.contains(&type_name) {
            return Err(SerializationError::UnknownType {
                kind: Self::KIND,
                type_name: type_name.to_string(),
            });
        }
        let node: Self = serde_json::from_value(value)?;
        node.validate()?;
        Ok(node)
    }

    /// Decode from a JSON string
    fn from_json(input: &str) -> SerializationResult<Self> {
        Self::from_json_value(serde_json::from_str(input)?)
    }
}

impl JsonCodec for Expression {
    const KIND: &'static str = "expression";
    const KNOWN_TYPES: &'static [&'static str] = &[
        "identifier",
        "feature",
        "reference",
        "equality",
        "logical",
        "comparison",
        "revision",
        "revisionRange",
    ];

    fn validate(&self) -> SerializationResult<()> {
        let invalid = |reason: String| SerializationError::Invalid {
            kind: Self::KIND,
            reason,
        };
        match self {
            Self::Logical(data) => {
                if data.right.is_empty() {
                    return Err(invalid("logical expression needs at least two operands".into()));
                }
                data.left.validate()?;
                data.right.iter().try_for_each(|operand| operand.validate())
            }
            Self::Equality(data) => {
                data.left.validate()?;
                data.right.validate()
            }
            Self::Comparison(data) => {
                data.left.validate()?;
                data.right.validate()
            }
            Self::RevisionRange(data) => validate_range(data, &range_source(data))
                .map(|_| ())
                .map_err(|e| invalid(e.to_string())),
            _ => Ok(()),
        }
    }
}

impl JsonCodec for ComparisonValue {
    const KIND: &'static str = "value";
    const KNOWN_TYPES: &'static [&'static str] = &[
        "boolean",
        "int",
        "hex",
        "float",
        "null",
        "statusCode",
        "identifier",
        "math",
    ];

    fn validate(&self) -> SerializationResult<()> {
        match self {
            // Nested operands carry their own discriminator
            Self::Math(op) => {
                op.left.validate()?;
                op.right.validate()
            }
            _ => Ok(()),
        }
    }
}

impl JsonCodec for Conformance {
    const KIND: &'static str = "conformance";
    const KNOWN_TYPES: &'static [&'static str] = &[
        "mandatory",
        "optional",
        "provisional",
        "deprecated",
        "disallowed",
        "described",
        "generic",
    ];

    fn validate(&self) -> SerializationResult<()> {
        match self.expression() {
            Some(expr) => expr.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Choice, ComparisonOperator, MathOperator};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_expression_round_trip() {
        let expr = Expression::and(
            Expression::feature("AB").negated().unwrap(),
            [
                Expression::reference("ref_Scenes"),
                Expression::comparison(
                    ComparisonOperator::GreaterThanOrEqual,
                    ComparisonValue::math(
                        MathOperator::Multiply,
                        ComparisonValue::identifier("MinLevel"),
                        ComparisonValue::int(2),
                    ),
                    ComparisonValue::hex(0x10),
                ),
            ],
        );
        let decoded = Expression::from_json(&expr.to_json().unwrap()).unwrap();
        assert_eq!(decoded, expr);
    }

    #[test]
    fn test_encoding_shape() {
        let value = Expression::feature("LT").to_json_value().unwrap();
        assert_eq!(value, json!({"type": "feature", "id": "LT", "not": false}));

        let conformance = Conformance::optional().with_choice(Choice::exactly_one("a"));
        assert_eq!(
            conformance.to_json_value().unwrap(),
            json!({"type": "optional", "choice": {"set": "a", "limit": {"type": "exact", "limit": 1}}})
        );
    }

    #[test]
    fn test_unknown_type_is_reported_by_name() {
        let err = Expression::from_json(r#"{"type": "x", "id": "AB"}"#).unwrap_err();
        assert!(matches!(err, SerializationError::UnknownType { .. }));
        assert_eq!(err.to_string(), "unknown expression type \"x\"");
    }

    #[test]
    fn test_missing_type() {
        let err = ComparisonValue::from_json(r#"{"value": 1}"#).unwrap_err();
        assert!(matches!(err, SerializationError::MissingType { kind: "value" }));
    }

    #[test]
    fn test_nested_unknown_type_is_a_json_error() {
        let input = r#"{"type": "equality", "left": {"type": "feature", "id": "A"}, "right": {"type": "bogus"}}"#;
        assert!(matches!(
            Expression::from_json(input).unwrap_err(),
            SerializationError::Json(_)
        ));
    }

    #[test]
    fn test_structural_validation() {
        let single = r#"{"type": "logical", "operand": "&", "left": {"type": "feature", "id": "A"}, "right": []}"#;
        assert!(matches!(
            Expression::from_json(single).unwrap_err(),
            SerializationError::Invalid { .. }
        ));

        let empty_range = r#"{"type": "revisionRange", "left": 2, "left_operator": "<", "right_operator": "<", "right": 2}"#;
        let err = Expression::from_json(empty_range).unwrap_err();
        assert!(err.to_string().contains("v2 < Rev < v2"));
    }

    #[test]
    fn test_conformance_round_trip() {
        let conformance = Conformance::mandatory_if(Expression::identifier("Zigbee"));
        let decoded = Conformance::from_json(&conformance.to_json().unwrap()).unwrap();
        assert_eq!(decoded, conformance);
        assert!(Conformance::from_json(r#"{"type": "sometimes"}"#).is_err());
    }
}
