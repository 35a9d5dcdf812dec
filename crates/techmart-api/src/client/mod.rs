//! HTTP client for the TechMart REST API.
//!
//! Wraps `reqwest` with typed error mapping, bearer-token handling, and
//! retry for idempotent reads. Endpoint groups live in submodules:
//! `storefront` (catalog and customer auth), `checkout` (orders and
//! payments), and `admin` (the bearer-authenticated admin console).

mod admin;
mod checkout;
mod storefront;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use techmart_core::AppConfig;

use crate::error::ApiError;
use crate::retry::retry_with_backoff;

pub use admin::AdminApi;

/// Longest backend error body echoed into an [`ApiError::Status`].
const MAX_DETAIL_CHARS: usize = 200;

/// Client for the TechMart REST API.
///
/// Use [`TechmartClient::new`] with the loaded [`AppConfig`], or
/// [`TechmartClient::with_base_url`] to point at a mock server in tests.
pub struct TechmartClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    /// Retry budget for `GET` requests only.
    pub(super) max_retries: u32,
    pub(super) backoff_base_ms: u64,
}

impl TechmartClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`ApiError::InvalidBaseUrl`] if the base URL is invalid.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client with explicit settings.
    ///
    /// `base_url` includes the API prefix, e.g. `http://localhost:8000/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not parse
    /// as an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Returns the admin endpoint group authenticated with `token`.
    #[must_use]
    pub fn admin<'a>(&'a self, token: &'a str) -> AdminApi<'a> {
        AdminApi::new(self, token)
    }

    /// Appends path segments to the base URL. Each segment is percent-encoded,
    /// so backend ids never alter the path structure.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: "URL cannot be a base".to_owned(),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Like [`Self::endpoint`] with query parameters appended.
    pub(crate) fn endpoint_with_query(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a `GET` with retry on transient errors and parses the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let mut request = self.client.get(url.clone());
                if let Some(token) = token {
                    request = request.bearer_auth(token);
                }
                tracing::debug!(method = "GET", %url, "sending request");
                let response = request.send().await?;
                read_json(response, &url).await
            }
        })
        .await
    }

    /// Sends a non-idempotent request exactly once and parses the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        read_json(response, url).await
    }

    /// Sends a non-idempotent request exactly once; any 2xx is success and the
    /// body is ignored.
    pub(crate) async fn send_expect_success(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<(), ApiError> {
        let response = request.send().await?;
        check_status(response, url).await?;
        Ok(())
    }
}

/// Maps non-2xx responses to typed errors, passing 2xx responses through.
async fn check_status(response: Response, url: &Url) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);
        return Err(ApiError::RateLimited { retry_after_secs });
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    tracing::debug!(status = status.as_u16(), %url, %detail, "request rejected");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized { detail }),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound {
            url: url.to_string(),
        }),
        _ => Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            detail,
        }),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ApiError> {
    let response = check_status(response, url).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

/// Pulls the human-readable message out of a FastAPI error body.
///
/// `{"detail": "..."}` yields the string; structured details (validation
/// error arrays) are rendered as compact JSON; non-JSON bodies are truncated.
pub(crate) fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(s)) => return s.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_owned();
    }
    if trimmed.chars().count() > MAX_DETAIL_CHARS {
        format!("{}...", trimmed.chars().take(MAX_DETAIL_CHARS).collect::<String>())
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
