//! JSON-over-HTTP wrapper around the recipe backend.
//!
//! Every call goes to `{base_url}{endpoint}` with `Content-Type:
//! application/json` and, when a token is stored, `Authorization: <scheme>
//! <token>`. Non-2xx answers become [`ClientError::Http`] carrying the status
//! and the parsed body. Nothing is retried.

use std::sync::Arc;

use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};
use url::Url;

use crate::{error::ClientError, token::TokenStore};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_AUTH_SCHEME: &str = "Token";

pub type Query<'a> = &'a [(&'a str, String)];

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth_scheme: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            tokens,
        })
    }

    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current_token().await.is_some()
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.request(Method::GET, endpoint, &[], None).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Query<'_>,
    ) -> Result<T, ClientError> {
        self.request(Method::GET, endpoint, query, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(endpoint, body)?;
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.request(Method::POST, endpoint, &[], None).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(endpoint, body)?;
        self.request(Method::PUT, endpoint, &[], Some(body)).await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(endpoint, body)?;
        self.request(Method::PATCH, endpoint, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.request(Method::DELETE, endpoint, &[], None).await
    }

    async fn current_token(&self) -> Option<String> {
        match self.tokens.get().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "failed to read stored token; continuing unauthenticated");
                None
            }
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: Query<'_>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.current_token().await {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("{} {}", self.auth_scheme, token),
            );
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        debug!(%method, endpoint, "api request");
        let response = builder.send().await.map_err(|err| {
            error!(%method, endpoint, error = %err, "api request failed");
            ClientError::from(err)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            error!(%method, endpoint, status = status.as_u16(), error = %err, "api response body unreadable");
            ClientError::from(err)
        })?;
        let document = parse_document(&bytes);

        if !status.is_success() {
            let err = ClientError::from_response(status, document);
            error!(%method, endpoint, status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }

        serde_json::from_value(document).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn encode_body<B: Serialize + ?Sized>(
    endpoint: &str,
    body: &B,
) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body).map_err(|source| ClientError::Encode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Non-JSON and empty bodies read as `{}`.
fn parse_document(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
