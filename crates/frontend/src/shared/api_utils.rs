//! API utilities for frontend-backend communication
//!
//! Base URL resolution, the `Authorization` header and the mapping of
//! `gloo-net` responses onto [`ApiError`].

use contracts::shared::api_error::{ApiError, ApiResult};
use gloo_net::http::{RequestBuilder, Response};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::system::auth::storage::{LocalStorage, SessionStorage, TOKEN_KEY};

/// Backend port used when the base URL is derived from the page location
const API_PORT: u16 = 8000;
const FALLBACK_API_BASE: &str = "http://localhost:8000/api";

static API_BASE: Lazy<String> = Lazy::new(|| {
    option_env!("CARS_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .or_else(base_from_location)
        .unwrap_or_else(|| FALLBACK_API_BASE.to_string())
});

fn base_from_location() -> Option<String> {
    let location = web_sys::window()?.location();
    let protocol = location.protocol().ok()?;
    let hostname = location.hostname().ok()?;
    Some(format!("{}//{}:{}/api", protocol, hostname, API_PORT))
}

/// Base URL of the REST API, e.g. `http://localhost:8000/api`
pub fn api_base() -> &'static str {
    &API_BASE
}

/// Full URL for an API path such as `/cars/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Value of the `Authorization` header for a session token
pub fn auth_header(token: &str) -> String {
    format!("Token {}", token)
}

/// Persisted session token, or [`ApiError::NotAuthenticated`]
pub fn require_token() -> ApiResult<String> {
    LocalStorage
        .get(TOKEN_KEY)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::NotAuthenticated)
}

/// Adds the session token to a request.
pub fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &auth_header(token))
}

pub fn network_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Sends a request without a body.
pub async fn send(builder: RequestBuilder) -> ApiResult<Response> {
    let response = builder.send().await.map_err(network_error)?;
    ensure_ok(response).await
}

/// Sends a request with a JSON body.
pub async fn send_json<B: serde::Serialize>(builder: RequestBuilder, body: &B) -> ApiResult<Response> {
    let request = builder
        .json(body)
        .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?;
    let response = request.send().await.map_err(network_error)?;
    ensure_ok(response).await
}

/// Turns a non-2xx response into the matching [`ApiError`].
pub async fn ensure_ok(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("{} {} -> {}", response.url(), status, body);
    Err(ApiError::from_status(status, &body))
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = response.text().await.map_err(network_error)?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

pub async fn read_bytes(response: Response) -> ApiResult<Vec<u8>> {
    response.binary().await.map_err(network_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_header_uses_token_scheme() {
        assert_eq!(auth_header("abc123"), "Token abc123");
    }
}
