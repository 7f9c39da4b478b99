// Response envelope shapes
//
// Every API response is wrapped as `{ status, data?, message? }`. Error
// responses may also carry an `errors` array of field-level messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EnvelopeStatus {
    Success,
    Error,
}

/// The outer wrapper around every successful response body.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub status: EnvelopeStatus,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a failed request. All fields optional: proxies and crashed
/// handlers answer with arbitrary bodies.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join field errors as `"field: message"` pairs separated by `", "`.
pub(crate) fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn joins_field_errors_in_order() {
        let errors = vec![
            FieldError::new("email", "Invalid email format"),
            FieldError::new("cpf", "CPF already registered"),
        ];
        assert_eq!(
            join_field_errors(&errors),
            "email: Invalid email format, cpf: CPF already registered"
        );
    }

    #[test]
    fn envelope_without_data_decodes() {
        let env: Envelope = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(env.status, EnvelopeStatus::Success);
        assert!(env.data.is_none());
    }
}
