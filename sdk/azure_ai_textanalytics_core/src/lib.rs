#![doc = include_str!("../README.md")]

pub mod auth;
pub mod error;
pub mod models;
pub mod pipeline;

pub use error::TextAnalyticsError;

/// Helpers for sibling crates' tests.
#[cfg(feature = "test-support")]
pub mod test_support {
    use crate::auth::TextAnalyticsCredential;
    use crate::pipeline::RetryPolicy;
    use std::time::Duration;

    /// Test API key (not a real key).
    pub const TEST_API_KEY: &str = "test-api-key";

    /// A credential carrying [`TEST_API_KEY`].
    pub fn test_credential() -> TextAnalyticsCredential {
        TextAnalyticsCredential::api_key(TEST_API_KEY)
    }

    /// A retry policy with millisecond backoff, so retry tests stay fast.
    pub fn fast_retry_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::from_millis(1),
        }
    }

    /// Start a mock server standing in for a Cognitive Services resource.
    pub async fn start_mock_server() -> wiremock::MockServer {
        wiremock::MockServer::start().await
    }
}
