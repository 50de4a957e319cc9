#![doc = include_str!("../README.md")]

pub mod client;
pub mod models;
pub mod operations;
pub mod profile;
pub mod versions;

pub use client::{ClientState, TextAnalyticsClient, TextAnalyticsClientBuilder};
pub use profile::{KnownProfile, Profile};
pub use versions::{ApiVersion, API_VERSION_TABLE};

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::client::{TextAnalyticsClient, TextAnalyticsClientBuilder};
    use crate::models::MultiLanguageInput;
    use azure_ai_textanalytics_core::test_support::{fast_retry_policy, test_credential};
    use wiremock::MockServer;

    /// A builder pointed at the mock server, with a fast retry policy.
    pub fn fast_client_builder(server: &MockServer) -> TextAnalyticsClientBuilder {
        TextAnalyticsClient::builder()
            .endpoint(server.uri())
            .credential(test_credential())
            .retry_policy(fast_retry_policy(1))
    }

    /// A single English document.
    pub fn docs() -> Vec<MultiLanguageInput> {
        vec![MultiLanguageInput::new("1", "I had a wonderful trip to Seattle last week.")
            .with_language("en")]
    }
}
