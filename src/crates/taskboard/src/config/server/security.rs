//! API key authentication middleware
//!
//! The key is read from the configured header or, when the header is absent,
//! from a query parameter of the same name.

use axum::extract::{Query, Request, State};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use crate::api::error::ApiError;
use crate::config::{SecurityConfig, ServerConfigError};

/// Security middleware state
#[derive(Clone)]
pub struct SecurityState {
    header: HeaderName,
    param: Arc<str>,
    api_key: Arc<str>,
    challenge: HeaderValue,
}

impl SecurityState {
    pub fn new(config: &SecurityConfig) -> Result<Self, ServerConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ServerConfigError::InvalidConfig("No API key configured".to_string()))?;

        let header = HeaderName::from_str(&config.api_key_header).map_err(|_| {
            ServerConfigError::InvalidConfig(format!(
                "Invalid API key header name: '{}'",
                config.api_key_header
            ))
        })?;

        let challenge = HeaderValue::from_str(&format!(
            "ApiKey realm=\"{}\"",
            config.api_key_realm
        ))
        .map_err(|_| {
            ServerConfigError::InvalidConfig(format!(
                "Invalid API key realm: '{}'",
                config.api_key_realm
            ))
        })?;

        Ok(Self {
            header,
            param: Arc::from(config.api_key_header.as_str()),
            api_key: Arc::from(api_key),
            challenge,
        })
    }

    /// Key presented by the request, header first
    fn presented_key(&self, request: &Request) -> Option<String> {
        if let Some(value) = request.headers().get(&self.header) {
            return value.to_str().ok().map(str::to_string);
        }

        Query::<HashMap<String, String>>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(mut params)| params.remove(self.param.as_ref()))
    }

    fn unauthorized(&self, message: &str) -> Response {
        let mut response = ApiError::Unauthorized(message.to_string()).into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, self.challenge.clone());
        response
    }
}

/// Reject requests without the configured API key
pub async fn api_key_middleware(
    State(state): State<SecurityState>,
    request: Request,
    next: Next,
) -> Response {
    match state.presented_key(&request) {
        Some(key) if key == *state.api_key => next.run(request).await,
        Some(_) => {
            warn!("Unauthorized request to {} - invalid API key", request.uri().path());
            state.unauthorized("Invalid API key")
        }
        None => {
            warn!("Unauthorized request to {} - missing API key", request.uri().path());
            state.unauthorized("Missing API key")
        }
    }
}
