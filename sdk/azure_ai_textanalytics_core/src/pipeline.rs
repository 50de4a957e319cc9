//! HTTP pipeline for Azure AI Text Analytics.
//!
//! [`PipelineClient`] owns the HTTP connection pool for one client handle,
//! attaches authentication, retries transient failures, and turns error
//! responses into [`TextAnalyticsError`] values. It is bound to a single base
//! URL (for example `https://<resource>.cognitiveservices.azure.com/text/analytics/v3.0`)
//! and every request path is appended to it.
//!
//! ```rust,no_run
//! use azure_ai_textanalytics_core::auth::TextAnalyticsCredential;
//! use azure_ai_textanalytics_core::pipeline::{PipelineClient, PipelineConfig};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let base_url = Url::parse("https://example.cognitiveservices.azure.com/text/analytics/v3.0")?;
//! let config = PipelineConfig::new(TextAnalyticsCredential::api_key("your-key"));
//! let mut pipeline = PipelineClient::new(base_url, config)?;
//!
//! let response = pipeline
//!     .post("/languages", &[], &serde_json::json!({"documents": []}))
//!     .await?;
//! println!("status: {}", response.status());
//!
//! pipeline.close();
//! # Ok(())
//! # }
//! ```

use crate::auth::TextAnalyticsCredential;
use crate::error::{TextAnalyticsError, TextAnalyticsResult};
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use url::Url;

use std::time::Duration;

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read/response timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Determines if an HTTP status code represents a retriable error.
///
/// Retriable errors are transient server-side issues that may succeed on retry:
/// - 429 Too Many Requests (rate limiting)
/// - 500 Internal Server Error
/// - 502 Bad Gateway
/// - 503 Service Unavailable
/// - 504 Gateway Timeout
#[inline]
pub fn is_retriable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Configuration for automatic retry behavior on transient errors.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial backoff duration before the first retry.
    /// Subsequent retries use exponential backoff (2^attempt * initial_backoff).
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Backoff before retry number `attempt` (0-based), with ±25% jitter.
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let base = self
            .initial_backoff
            .saturating_mul(2_u32.saturating_pow(attempt));
        let jitter = 0.75 + fastrand::f64() * 0.5;
        base.mul_f64(jitter)
    }
}

/// Settings for a [`PipelineClient`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Credential used to authenticate every request.
    pub credential: TextAnalyticsCredential,
    /// Retry behavior for transient failures.
    pub retry_policy: RetryPolicy,
    /// Connection timeout. Ignored when `http_client` is set.
    pub connect_timeout: Duration,
    /// Whole-request timeout. Ignored when `http_client` is set.
    pub read_timeout: Duration,
    /// Pre-configured HTTP client (proxies, TLS settings, ...).
    pub http_client: Option<HttpClient>,
}

impl PipelineConfig {
    /// Create a configuration with default timeouts and retry policy.
    pub fn new(credential: TextAnalyticsCredential) -> Self {
        Self {
            credential,
            retry_policy: RetryPolicy::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            http_client: None,
        }
    }
}

/// The HTTP execution layer behind a Text Analytics client.
///
/// A pipeline is bound to one base URL for its whole life. After
/// [`close`](Self::close) the connection pool is released and every request
/// fails with [`TextAnalyticsError::InvalidState`].
#[derive(Debug)]
pub struct PipelineClient {
    http: Option<HttpClient>,
    base_url: Url,
    credential: TextAnalyticsCredential,
    retry_policy: RetryPolicy,
}

impl PipelineClient {
    /// Create a pipeline for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, config: PipelineConfig) -> TextAnalyticsResult<Self> {
        let http = match config.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(config.connect_timeout)
                .timeout(config.read_timeout)
                .build()?,
        };

        tracing::debug!(base_url = %base_url, "pipeline created");

        Ok(Self {
            http: Some(http),
            base_url,
            credential: config.credential,
            retry_policy: config.retry_policy,
        })
    }

    /// Get the base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the retry policy configuration.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Release the HTTP connection pool.
    ///
    /// Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            tracing::debug!(base_url = %self.base_url, "pipeline closed");
        }
    }

    /// Build a full URL by appending `path` to the base URL.
    ///
    /// Unlike [`Url::join`], the base URL's path is always preserved.
    pub fn url(&self, path: &str) -> TextAnalyticsResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|e| TextAnalyticsError::invalid_endpoint_with_source("failed to construct URL", e))
    }

    /// Send a POST request with a JSON body, retrying transient errors.
    ///
    /// Automatically adds authentication headers. Retries on retriable HTTP
    /// errors (429, 500, 502, 503, 504) with exponential backoff.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::InvalidState`] if the pipeline is closed,
    /// or an error if authentication fails, the request fails after all
    /// retries, or the server returns a non-retriable error.
    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &T,
    ) -> TextAnalyticsResult<reqwest::Response> {
        let http = self.http.as_ref().ok_or(TextAnalyticsError::InvalidState {
            operation: "post",
            state: "closed",
        })?;
        let url = self.url(path)?;
        let auth = self.credential.resolve().await?;

        for attempt in 0..=self.retry_policy.max_retries {
            let response = http
                .post(url.clone())
                .header(auth.name, auth.value.expose_secret())
                .query(query)
                .json(body)
                .send()
                .await?;

            if response.status().is_success() {
                return Ok(response);
            }

            let status = response.status().as_u16();
            if !is_retriable_status(status) || attempt == self.retry_policy.max_retries {
                return Self::check_response(response).await;
            }

            let backoff = self.retry_policy.backoff(attempt);
            tracing::warn!(
                status,
                attempt = attempt + 1,
                backoff_ms = backoff.as_millis() as u64,
                "transient error, retrying",
            );
            tokio::time::sleep(backoff).await;
        }

        unreachable!("retry loop should return before reaching here")
    }

    /// Maximum length for error messages to prevent sensitive data leaks.
    const MAX_ERROR_MESSAGE_LEN: usize = 1000;

    /// Redact credential material that a service may echo back in an error body.
    pub(crate) fn sanitize_error_message(msg: &str) -> String {
        let mut result = msg.to_string();
        for marker in ["Bearer ", "Ocp-Apim-Subscription-Key: ", "Ocp-Apim-Subscription-Key="] {
            result = redact_after(&result, marker);
        }
        result
    }

    /// Sanitize, then truncate a message that exceeds the maximum length.
    pub(crate) fn truncate_message(msg: &str) -> String {
        let sanitized = Self::sanitize_error_message(msg);

        if sanitized.len() > Self::MAX_ERROR_MESSAGE_LEN {
            let mut cut = Self::MAX_ERROR_MESSAGE_LEN;
            while !sanitized.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}... (truncated)", &sanitized[..cut])
        } else {
            sanitized
        }
    }

    /// Check the response status and return an error if not successful.
    async fn check_response(response: reqwest::Response) -> TextAnalyticsResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if let Ok(error) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(err_obj) = error.get("error") {
                return Err(TextAnalyticsError::Api {
                    code: err_obj
                        .get("code")
                        .and_then(|c| c.as_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    message: Self::truncate_message(
                        err_obj
                            .get("message")
                            .and_then(|m| m.as_str())
                            .unwrap_or(&body),
                    ),
                });
            }
        }

        Err(TextAnalyticsError::http(status, Self::truncate_message(&body)))
    }
}

/// Replace every value following `marker` with `[REDACTED]`.
fn redact_after(input: &str, marker: &str) -> String {
    const REDACTED: &str = "[REDACTED]";
    let mut result = input.to_string();
    let mut search_start = 0;

    while let Some(relative_pos) = result[search_start..].find(marker) {
        let value_start = search_start + relative_pos + marker.len();
        if result[value_start..].starts_with(REDACTED) {
            search_start = value_start + REDACTED.len();
            continue;
        }

        let value_end = result[value_start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
            .map(|pos| value_start + pos)
            .unwrap_or(result.len());

        if value_end > value_start {
            result.replace_range(value_start..value_end, REDACTED);
            search_start = value_start + REDACTED.len();
        } else {
            search_start = value_start;
        }

        if search_start >= result.len() {
            break;
        }
    }

    result
}
