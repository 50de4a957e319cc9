//! Wire types shared by every Text Analytics API version.

use serde::{Deserialize, Serialize};

/// A document to analyze, with an optional language hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLanguageInput {
    /// Unique, non-empty document identifier.
    pub id: String,
    /// The input text to process.
    pub text: String,
    /// ISO 639-1 language code, e.g. `"en"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl MultiLanguageInput {
    /// Create a document without a language hint.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            language: None,
        }
    }

    /// Set the language hint.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// A document for language detection, with an optional country hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInput {
    /// Unique, non-empty document identifier.
    pub id: String,
    /// The input text to process.
    pub text: String,
    /// ISO 3166-1 alpha-2 country code, e.g. `"US"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_hint: Option<String>,
}

impl LanguageInput {
    /// Create a document without a country hint.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            country_hint: None,
        }
    }

    /// Set the country hint.
    pub fn with_country_hint(mut self, country_hint: impl Into<String>) -> Self {
        self.country_hint = Some(country_hint.into());
        self
    }
}

/// Request body for every operation except language detection.
#[derive(Debug, Clone, Serialize)]
pub struct MultiLanguageBatchInput<'a> {
    pub documents: &'a [MultiLanguageInput],
}

/// Request body for language detection.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageBatchInput<'a> {
    pub documents: &'a [LanguageInput],
}

/// Error details returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceErrorDetail {
    /// Error code, e.g. `"InvalidArgument"`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Error target.
    pub target: Option<String>,
    /// Inner error with a more specific code.
    #[serde(rename = "innererror")]
    pub inner_error: Option<InnerError>,
}

/// A more specific error nested inside [`ServiceErrorDetail`].
#[derive(Debug, Clone, Deserialize)]
pub struct InnerError {
    pub code: String,
    pub message: String,
    pub target: Option<String>,
}

/// A per-document failure inside an otherwise successful batch.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentError {
    /// The failed document's identifier.
    pub id: String,
    /// What went wrong.
    pub error: ServiceErrorDetail,
}

/// A non-fatal warning attached to a document result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalyticsWarning {
    pub code: String,
    pub message: String,
    pub target_ref: Option<String>,
}

/// Per-document statistics, returned when `showStats` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatistics {
    pub characters_count: u32,
    pub transactions_count: u32,
}

/// Batch statistics, returned when `showStats` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatistics {
    pub documents_count: u32,
    pub valid_documents_count: u32,
    pub erroneous_documents_count: u32,
    pub transactions_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_language_input_omits_missing_language() {
        let doc = MultiLanguageInput::new("1", "hello");
        let json = serde_json::to_value(&doc).expect("should serialize");
        assert_eq!(json, serde_json::json!({"id": "1", "text": "hello"}));
    }

    #[test]
    fn test_language_input_uses_camel_case_hint() {
        let doc = LanguageInput::new("1", "bonjour").with_country_hint("FR");
        let json = serde_json::to_value(&doc).expect("should serialize");
        assert_eq!(json["countryHint"], "FR");
    }

    #[test]
    fn test_batch_input_wraps_documents() {
        let docs = [MultiLanguageInput::new("1", "hi").with_language("en")];
        let json = serde_json::to_value(MultiLanguageBatchInput { documents: &docs })
            .expect("should serialize");
        assert_eq!(json["documents"][0]["language"], "en");
    }

    #[test]
    fn test_document_error_deserialization() {
        let json = r#"{
            "id": "2",
            "error": {
                "code": "InvalidArgument",
                "message": "Invalid document in request.",
                "innererror": {"code": "InvalidDocument", "message": "Document text is empty."}
            }
        }"#;
        let err: DocumentError = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(err.id, "2");
        assert_eq!(err.error.code, "InvalidArgument");
        let inner = err.error.inner_error.expect("should have inner error");
        assert_eq!(inner.code, "InvalidDocument");
    }

    #[test]
    fn test_request_statistics_deserialization() {
        let json = r#"{
            "documentsCount": 3,
            "validDocumentsCount": 2,
            "erroneousDocumentsCount": 1,
            "transactionsCount": 3
        }"#;
        let stats: RequestStatistics = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(stats.documents_count, 3);
        assert_eq!(stats.erroneous_documents_count, 1);
    }
}
