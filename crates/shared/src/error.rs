use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Transport,
    Internal,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 409 | 422 => Self::Validation,
            _ => Self::Internal,
        }
    }
}

/// Failure payload reported by the dictionary API.
///
/// The API answers either `{"detail": "..."}` or a map of field name to
/// messages. Both are kept untouched so they can be shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
            field_errors: BTreeMap::new(),
        }
    }

    /// Decodes an error response body. Unknown shapes fall back to the raw
    /// body text as the detail.
    pub fn from_body(code: ErrorCode, body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::new(code, body.trim());
        };
        let Some(map) = value.as_object() else {
            return Self::new(code, body.trim());
        };

        let detail = map
            .get("detail")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let mut field_errors = BTreeMap::new();
        for (field, messages) in map.iter().filter(|(k, _)| k.as_str() != "detail") {
            let messages = match messages {
                serde_json::Value::String(s) => vec![s.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                other => vec![other.to_string()],
            };
            field_errors.insert(field.clone(), messages);
        }

        Self {
            code,
            detail,
            field_errors,
        }
    }

    /// Text shown to the user. Never paraphrased.
    pub fn verbatim(&self) -> String {
        if let Some(detail) = &self.detail {
            return detail.clone();
        }
        self.field_errors
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ApiException> for ApiError {
    fn from(value: ApiException) -> Self {
        Self::new(value.code, value.message)
    }
}

impl From<ApiError> for ApiException {
    fn from(value: ApiError) -> Self {
        let message = value.verbatim();
        Self {
            code: value.code,
            message,
        }
    }
}
