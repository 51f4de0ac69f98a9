//! HTTP transport.
//!
//! This module handles:
//! - One pooled `reqwest::Client` per client instance
//! - Authorization headers from the current credentials
//! - Rate limit header tracking
//! - Status code mapping and envelope decoding
//!
//! Every verb goes through the same path, so 429 handling and rate limit
//! tracking apply to GET, POST and DELETE alike.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use super::{Credentials, Throttle};
use crate::config::Config;
use crate::error::{ImgurError, Result};
use crate::models::{ApiResponse, ErrorEnvelope, RateLimits};

/// Longest slice of an undecodable error body kept in the error message
const MAX_ERROR_BODY: usize = 200;

/// Transport for the REST and OAuth endpoints
#[derive(Debug)]
pub struct Transport {
    /// HTTP client (connection pool)
    client: reqwest::Client,
    /// Root of the versioned API, e.g. `https://api.imgur.com/3/`
    base_url: Url,
    /// Root of the OAuth2 endpoints
    oauth_url: Url,
    /// Current credentials, replaced on token refresh
    credentials: RwLock<Credentials>,
    /// Most recent rate limit headers
    rate_limits: RwLock<RateLimits>,
    /// Client-side pacing
    throttle: Throttle,
}

impl Transport {
    /// Create a transport from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .connect_timeout(config.api.connect_timeout())
            .user_agent(config.api.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base(&config.api.base_url, "base_url")?,
            oauth_url: parse_base(&config.api.oauth_url, "oauth_url")?,
            credentials: RwLock::new(Credentials::from(&config.auth)),
            rate_limits: RwLock::new(RateLimits::default()),
            throttle: Throttle::new(&config.rate_limit)?,
        })
    }

    // -------------------------------------------------------------------------
    // Shared state
    // -------------------------------------------------------------------------

    /// Snapshot of the current credentials
    pub fn credentials(&self) -> Credentials {
        read(&self.credentials).clone()
    }

    /// Apply a change to the credentials
    pub fn update_credentials<F: FnOnce(&mut Credentials)>(&self, f: F) {
        f(&mut write(&self.credentials));
    }

    /// Snapshot of the latest rate limits
    pub fn rate_limits(&self) -> RateLimits {
        read(&self.rate_limits).clone()
    }

    // -------------------------------------------------------------------------
    // URL building
    // -------------------------------------------------------------------------

    /// API URL for the given path segments; each segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        join_segments(&self.base_url, segments)
    }

    /// OAuth URL for the given path segments
    pub fn oauth_endpoint(&self, segments: &[&str]) -> Result<Url> {
        join_segments(&self.oauth_url, segments)
    }

    // -------------------------------------------------------------------------
    // Verbs
    // -------------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let mut request = self.client.get(url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send_envelope(Method::GET, url, request).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &[(String, String)],
    ) -> Result<ApiResponse<T>> {
        let request = self.client.post(url.clone()).form(form);
        self.send_envelope(Method::POST, url, request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: Form,
    ) -> Result<ApiResponse<T>> {
        let request = self.client.post(url.clone()).multipart(form);
        self.send_envelope(Method::POST, url, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>> {
        let request = self.client.delete(url.clone());
        self.send_envelope(Method::DELETE, url, request).await
    }

    /// POST to an OAuth endpoint. These answer with bare JSON, no envelope,
    /// and take no Authorization header.
    pub async fn post_oauth<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &[(String, String)],
    ) -> Result<T> {
        let request = self.client.post(url.clone()).form(form);
        let response = self.execute(Method::POST, &url, request, false).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let response = self.execute(method.clone(), &url, request, true).await?;
        let status = response.status();
        let body = response.text().await?;

        let value: Value = serde_json::from_str(&body)?;
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let message = error_message(status, &body);
            warn!(%method, url = %url, %status, error = %message, "Request reported failure");
            return Err(ImgurError::Api {
                status: value
                    .get("status")
                    .and_then(Value::as_u64)
                    .and_then(|s| u16::try_from(s).ok())
                    .unwrap_or(status.as_u16()),
                message,
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Pace, authorize, send, record rate limits and map error statuses
    async fn execute(
        &self,
        method: Method,
        url: &Url,
        request: RequestBuilder,
        authorize: bool,
    ) -> Result<Response> {
        self.throttle.acquire().await;

        let request = if authorize {
            let header = read(&self.credentials).authorization_header();
            request.header(AUTHORIZATION, header)
        } else {
            request
        };

        debug!(%method, url = %url, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, url = %url, error = %e, "Request failed");
            ImgurError::from(e)
        })?;

        let status = response.status();
        self.record_rate_limits(response.headers());

        debug!(%method, url = %url, %status, "Received response");

        if status.is_success() {
            return Ok(response);
        }

        let reset = RateLimits::reset_hint(response.headers());
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);

        warn!(%method, url = %url, %status, error = %message, "Request rejected");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = match reset {
                Some(reset) => format!("{} (resets at {})", message, reset),
                None => message,
            };
            return Err(ImgurError::rate_limit_exceeded(message, reset));
        }

        Err(ImgurError::from_status(status, message))
    }

    fn record_rate_limits(&self, headers: &HeaderMap) {
        write(&self.rate_limits).update_from_headers(headers);
    }
}

/// Message for a failed response: the envelope's error text if present,
/// otherwise a trimmed copy of the body, otherwise the status reason
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.message())
    {
        return message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }

    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

fn parse_base(raw: &str, name: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ImgurError::config(format!("{} is not a valid URL: {}", name, e)))?;
    if url.cannot_be_a_base() {
        return Err(ImgurError::config(format!(
            "{} cannot be used as a base URL",
            name
        )));
    }
    Ok(url)
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ImgurError::config(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
