//! Integration tests for azure_ai_textanalytics.
//!
//! These tests require a live Cognitive Services resource.
//! Run with: `cargo test --features integration-tests`
//!
//! Required environment variables:
//! - `AZURE_TEXT_ANALYTICS_ENDPOINT`: The resource endpoint URL
//! - `AZURE_TEXT_ANALYTICS_KEY`: The resource key

#![cfg(feature = "integration-tests")]

use azure_ai_textanalytics::models::{LanguageInput, MultiLanguageInput, TextSentiment};
use azure_ai_textanalytics::operations::{AnalyzeOptions, PiiOptions, SentimentOptions};
use azure_ai_textanalytics::{ApiVersion, TextAnalyticsClient};
use azure_ai_textanalytics_core::auth::TextAnalyticsCredential;
use azure_ai_textanalytics_core::TextAnalyticsError;

fn get_client(api_version: ApiVersion) -> TextAnalyticsClient {
    let endpoint = std::env::var("AZURE_TEXT_ANALYTICS_ENDPOINT")
        .expect("AZURE_TEXT_ANALYTICS_ENDPOINT not set");
    let key = std::env::var("AZURE_TEXT_ANALYTICS_KEY").expect("AZURE_TEXT_ANALYTICS_KEY not set");

    TextAnalyticsClient::builder()
        .endpoint(endpoint)
        .credential(TextAnalyticsCredential::api_key(key))
        .api_version(api_version.as_str())
        .build()
        .expect("Failed to build client")
}

fn documents() -> Vec<MultiLanguageInput> {
    vec![
        MultiLanguageInput::new("1", "The hotel was clean and the staff were friendly.")
            .with_language("en"),
        MultiLanguageInput::new("2", "The food was cold and the service was slow.")
            .with_language("en"),
    ]
}

#[tokio::test]
async fn test_languages() {
    let client = get_client(ApiVersion::V3_0);
    let docs = [
        LanguageInput::new("1", "Hello world"),
        LanguageInput::new("2", "Bonjour tout le monde").with_country_hint("FR"),
    ];

    let result = client
        .languages(&docs, &AnalyzeOptions::new())
        .await
        .expect("languages");
    assert_eq!(result.documents.len(), 2);
    assert_eq!(result.documents[0].detected_language.iso6391_name, "en");
    assert_eq!(result.documents[1].detected_language.iso6391_name, "fr");
}

#[tokio::test]
async fn test_sentiment_on_every_version() {
    for version in ApiVersion::ALL {
        let client = get_client(version);
        let result = client
            .sentiment(&documents(), &SentimentOptions::new())
            .await
            .expect("sentiment");
        assert_eq!(result.documents[0].sentiment, TextSentiment::Positive, "{version}");
        assert_eq!(result.documents[1].sentiment, TextSentiment::Negative, "{version}");
    }
}

#[tokio::test]
async fn test_opinion_mining() {
    let client = get_client(ApiVersion::V3_1Preview1);
    let result = client
        .sentiment(&documents(), &SentimentOptions::new().opinion_mining(true))
        .await
        .expect("sentiment with opinion mining");
    let sentences = &result.documents[0].sentences;
    assert!(sentences.iter().any(|s| !s.targets.is_empty()));
}

#[tokio::test]
async fn test_key_phrases_and_entities() {
    let client = get_client(ApiVersion::V3_0);
    let docs = [MultiLanguageInput::new("1", "Microsoft was founded by Bill Gates in Albuquerque.")
        .with_language("en")];

    let phrases = client
        .key_phrases(&docs, &AnalyzeOptions::new().show_stats(true))
        .await
        .expect("key phrases");
    assert!(!phrases.documents[0].key_phrases.is_empty());
    assert!(phrases.statistics.is_some());

    let entities = client
        .entities_recognition_general(&docs, &AnalyzeOptions::new())
        .await
        .expect("entities");
    assert!(entities.documents[0]
        .entities
        .iter()
        .any(|e| e.text == "Bill Gates"));

    let linked = client
        .entities_linking(&docs, &AnalyzeOptions::new())
        .await
        .expect("linked entities");
    assert!(!linked.documents[0].entities.is_empty());
}

#[tokio::test]
async fn test_pii_requires_preview() {
    let docs = [MultiLanguageInput::new("1", "My SSN is 859-98-0987.").with_language("en")];

    let client = get_client(ApiVersion::V3_0);
    let err = client
        .entities_recognition_pii(&docs, &PiiOptions::new())
        .await
        .expect_err("v3.0 has no PII endpoint");
    assert!(matches!(err, TextAnalyticsError::UnsupportedOperation { .. }));

    let client = get_client(ApiVersion::V3_1Preview2);
    let result = client
        .entities_recognition_pii(&docs, &PiiOptions::new())
        .await
        .expect("pii");
    let redacted = result.documents[0].redacted_text.as_deref().unwrap_or_default();
    assert!(!redacted.contains("859-98-0987"));
}

#[tokio::test]
async fn test_closed_client_rejects_calls() {
    let mut client = get_client(ApiVersion::V3_0);
    client.close();
    let err = client
        .key_phrases(&documents(), &AnalyzeOptions::new())
        .await
        .expect_err("closed");
    assert!(matches!(err, TextAnalyticsError::InvalidState { .. }));
}
