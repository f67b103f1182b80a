//! The API's standard error envelope.
//!
//! Error responses carry a JSON body of the form:
//!
//! ```json
//! {"code": 10000, "description": "Unknown request: /missing"}
//! ```
//!
//! [`ErrorEnvelope`] is the strict, typed form used to build such bodies.
//! [`DecodedEnvelope`] is what an assertion sees after decoding an arbitrary
//! response body: a JSON object whose fields may be absent or mistyped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Error code the API uses for requests it does not recognise.
pub const UNKNOWN_REQUEST_CODE: i64 = 10000;

/// Description prefix the API uses for requests it does not recognise.
pub const UNKNOWN_REQUEST_DESCRIPTION: &str = "Unknown request";

const CODE_FIELD: &str = "code";
const DESCRIPTION_FIELD: &str = "description";

/// A well-typed error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Domain-specific error code.
    pub code: i64,
    /// Human-readable message.
    pub description: String,
}

impl ErrorEnvelope {
    /// Creates a new envelope.
    pub fn new(code: i64, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// Creates the envelope the API returns for an unknown request.
    pub fn unknown_request(detail: &str) -> Self {
        Self::new(
            UNKNOWN_REQUEST_CODE,
            format!("{}: {}", UNKNOWN_REQUEST_DESCRIPTION, detail),
        )
    }

    /// Serializes the envelope to a JSON body.
    pub fn to_body(&self) -> String {
        serde_json::json!({
            "code": self.code,
            "description": self.description,
        })
        .to_string()
    }
}

/// A decoded error body with optional field access.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEnvelope {
    fields: Map<String, Value>,
}

impl DecodedEnvelope {
    /// Decodes a response body.
    ///
    /// The body must be a JSON object; any other JSON value is rejected with
    /// [`DecodeError::NotAnObject`].
    pub fn decode(body: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DecodeError::NotAnObject(json_kind(&other))),
        }
    }

    /// Returns the raw `code` field, if present.
    pub fn code(&self) -> Option<&Value> {
        self.fields.get(CODE_FIELD)
    }

    /// Returns the raw `description` field, if present.
    pub fn description(&self) -> Option<&Value> {
        self.fields.get(DESCRIPTION_FIELD)
    }

    /// Returns the `description` field when it is a JSON string.
    ///
    /// Any other JSON type, `null` included, yields `None`.
    pub fn description_text(&self) -> Option<&str> {
        self.description()?.as_str()
    }

    /// Returns true if the `code` field equals `expected`.
    ///
    /// Integral floats such as `10000.0` compare equal; strings never do.
    pub fn code_equals(&self, expected: i64) -> bool {
        match self.code() {
            Some(Value::Number(number)) => {
                if let Some(code) = number.as_i64() {
                    code == expected
                } else {
                    number.as_f64() == Some(expected as f64)
                }
            }
            _ => false,
        }
    }

    /// Returns the typed envelope when both fields are well typed.
    pub fn to_envelope(&self) -> Option<ErrorEnvelope> {
        let code = self.code()?.as_i64()?;
        let description = self.description()?.as_str()?;
        Some(ErrorEnvelope::new(code, description))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_request_envelope() {
        let envelope = ErrorEnvelope::unknown_request("foo");
        assert_eq!(envelope.code, 10000);
        assert_eq!(envelope.description, "Unknown request: foo");
    }

    #[test]
    fn test_to_body_decodes_back() {
        let body = ErrorEnvelope::unknown_request("/missing").to_body();
        let decoded = DecodedEnvelope::decode(&body).unwrap();
        assert_eq!(
            decoded.to_envelope(),
            Some(ErrorEnvelope::unknown_request("/missing"))
        );
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = DecodedEnvelope::decode("not json").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_decode_empty_body() {
        let err = DecodedEnvelope::decode("").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_decode_non_object() {
        assert_eq!(
            DecodedEnvelope::decode("[1, 2]").unwrap_err(),
            DecodeError::NotAnObject("array")
        );
        assert_eq!(
            DecodedEnvelope::decode("\"text\"").unwrap_err(),
            DecodeError::NotAnObject("string")
        );
        assert_eq!(
            DecodedEnvelope::decode("null").unwrap_err(),
            DecodeError::NotAnObject("null")
        );
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let decoded = DecodedEnvelope::decode("{}").unwrap();
        assert_eq!(decoded.code(), None);
        assert_eq!(decoded.description(), None);
        assert_eq!(decoded.description_text(), None);
        assert_eq!(decoded.to_envelope(), None);
    }

    #[test]
    fn test_code_equals() {
        let decoded = DecodedEnvelope::decode(r#"{"code": 10000}"#).unwrap();
        assert!(decoded.code_equals(10000));
        assert!(!decoded.code_equals(9999));

        let float = DecodedEnvelope::decode(r#"{"code": 10000.0}"#).unwrap();
        assert!(float.code_equals(10000));

        let string = DecodedEnvelope::decode(r#"{"code": "10000"}"#).unwrap();
        assert!(!string.code_equals(10000));
    }

    #[test]
    fn test_description_text_non_string() {
        let text = DecodedEnvelope::decode(r#"{"description": "Unknown request"}"#).unwrap();
        assert_eq!(text.description_text(), Some("Unknown request"));

        for body in [
            r#"{"description": 42}"#,
            r#"{"description": true}"#,
            r#"{"description": ["Unknown request"]}"#,
            r#"{"description": {"Unknown request": 1}}"#,
        ] {
            let decoded = DecodedEnvelope::decode(body).unwrap();
            assert!(decoded.description().is_some(), "{}", body);
            assert_eq!(decoded.description_text(), None, "{}", body);
        }

        let null = DecodedEnvelope::decode(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description(), Some(&json!(null)));
        assert_eq!(null.description_text(), None);
    }
}
