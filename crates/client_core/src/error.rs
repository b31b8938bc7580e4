use reqwest::StatusCode;
use shared::error::{ErrorBody, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend answered outside 2xx. `body` is the parsed JSON document, or an
    /// empty object when the response was not JSON.
    #[error("request failed (status {}): {message}", status.as_u16())]
    Http {
        status: StatusCode,
        message: String,
        body: serde_json::Value,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
    #[error("failed to encode request body for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        source: serde_json::Error,
    },
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),
    #[error("token storage failed: {0}")]
    TokenStorage(#[source] anyhow::Error),
}

impl ClientError {
    pub(crate) fn from_response(status: StatusCode, body: serde_json::Value) -> Self {
        let message = ErrorBody::from_value(&body)
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self::Http {
            status,
            message,
            body,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn requires_reauth(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}
