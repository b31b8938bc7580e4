use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error document returned by the recipe backend on non-2xx responses.
///
/// Views answer with `{"error": ..., "message": ...}`, the framework itself with
/// `{"detail": ...}`, and serializer validation with per-field lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ErrorBody {
    /// Best human message in the order the mobile client used.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// First validation message per field, e.g. `email: already taken`.
    pub fn field_errors(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter_map(|(field, value)| {
                let first = match value {
                    serde_json::Value::Array(items) => items.first()?.as_str()?,
                    serde_json::Value::String(s) => s.as_str(),
                    _ => return None,
                };
                Some(format!("{field}: {first}"))
            })
            .collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_message_then_detail_then_error() {
        let body = ErrorBody::from_value(&serde_json::json!({
            "error": "Failed to generate meal plan",
            "message": "upstream timeout"
        }));
        assert_eq!(body.message(), Some("upstream timeout"));

        let body = ErrorBody::from_value(&serde_json::json!({
            "detail": "Authentication credentials were not provided."
        }));
        assert_eq!(
            body.message(),
            Some("Authentication credentials were not provided.")
        );

        let body = ErrorBody::from_value(&serde_json::json!({"error": "Recipe not found"}));
        assert_eq!(body.message(), Some("Recipe not found"));
    }

    #[test]
    fn collects_field_errors_from_validation_payload() {
        let body = ErrorBody::from_value(&serde_json::json!({
            "email": ["user with this email already exists."],
            "password": ["This password is too short."]
        }));
        assert_eq!(body.message(), None);
        assert_eq!(
            body.field_errors(),
            vec![
                "email: user with this email already exists.".to_string(),
                "password: This password is too short.".to_string(),
            ]
        );
    }

    #[test]
    fn non_object_body_yields_empty_error() {
        let body = ErrorBody::from_value(&serde_json::json!(["not", "an", "object"]));
        assert_eq!(body, ErrorBody::default());
    }
}
