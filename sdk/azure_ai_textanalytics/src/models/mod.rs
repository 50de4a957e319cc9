//! Request and response models, grouped per API version.
//!
//! The concrete types are defined once in this module. Each version module
//! ([`v3_0`], [`v3_1_preview_1`], [`v3_1_preview_2`]) re-exports the subset
//! that version defines, and [`ModelsModule`] describes that subset at
//! runtime, so callers can ask a client which models its version speaks.

use serde::Deserialize;

use crate::versions::ApiVersion;

pub use azure_ai_textanalytics_core::models::{
    DocumentError, DocumentStatistics, InnerError, LanguageInput, MultiLanguageInput,
    RequestStatistics, ServiceErrorDetail, TextAnalyticsWarning,
};

pub mod v3_0;
pub mod v3_1_preview_1;
pub mod v3_1_preview_2;

/// The models defined by one API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelsModule {
    /// Models of [`v3_0`].
    V3_0,
    /// Models of [`v3_1_preview_1`].
    V3_1Preview1,
    /// Models of [`v3_1_preview_2`].
    V3_1Preview2,
}

impl ModelsModule {
    /// The version these models belong to.
    pub fn api_version(self) -> ApiVersion {
        match self {
            Self::V3_0 => ApiVersion::V3_0,
            Self::V3_1Preview1 => ApiVersion::V3_1Preview1,
            Self::V3_1Preview2 => ApiVersion::V3_1Preview2,
        }
    }

    /// Names of every model type the version defines, sorted.
    pub fn type_names(self) -> &'static [&'static str] {
        match self {
            Self::V3_0 => v3_0::TYPE_NAMES,
            Self::V3_1Preview1 => v3_1_preview_1::TYPE_NAMES,
            Self::V3_1Preview2 => v3_1_preview_2::TYPE_NAMES,
        }
    }

    /// Returns `true` if the version defines a model called `type_name`.
    pub fn contains(self, type_name: &str) -> bool {
        self.type_names().binary_search(&type_name).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Batch envelope
// ---------------------------------------------------------------------------

/// The envelope every operation returns: per-document results plus errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult<D> {
    /// Results for the documents that succeeded.
    pub documents: Vec<D>,
    /// Failures for the documents that did not.
    #[serde(default)]
    pub errors: Vec<DocumentError>,
    /// Batch statistics, present when `showStats` was requested.
    pub statistics: Option<RequestStatistics>,
    /// The model version the service used.
    pub model_version: String,
}

impl<D> AnalysisResult<D> {
    /// Returns `true` if at least one document failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of [`languages`](crate::client::TextAnalyticsClient::languages).
pub type LanguageResult = AnalysisResult<DocumentLanguage>;
/// Result of [`sentiment`](crate::client::TextAnalyticsClient::sentiment).
pub type SentimentResponse = AnalysisResult<DocumentSentiment>;
/// Result of [`key_phrases`](crate::client::TextAnalyticsClient::key_phrases).
pub type KeyPhraseResult = AnalysisResult<DocumentKeyPhrases>;
/// Result of [`entities_recognition_general`](crate::client::TextAnalyticsClient::entities_recognition_general).
pub type EntitiesResult = AnalysisResult<DocumentEntities>;
/// Result of [`entities_linking`](crate::client::TextAnalyticsClient::entities_linking).
pub type EntityLinkingResult = AnalysisResult<DocumentLinkedEntities>;
/// Result of [`entities_recognition_pii`](crate::client::TextAnalyticsClient::entities_recognition_pii).
pub type PiiResult = AnalysisResult<PiiDocumentEntities>;

// ---------------------------------------------------------------------------
// Language detection
// ---------------------------------------------------------------------------

/// The language detected for a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLanguage {
    /// Long name, e.g. `"English"`.
    pub name: String,
    /// ISO 639-1 code, e.g. `"en"`.
    #[serde(rename = "iso6391Name")]
    pub iso6391_name: String,
    /// Confidence between 0 and 1.
    pub confidence_score: f64,
}

/// Language detection result for one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLanguage {
    pub id: String,
    pub detected_language: DetectedLanguage,
    #[serde(default)]
    pub warnings: Vec<TextAnalyticsWarning>,
    pub statistics: Option<DocumentStatistics>,
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// A sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

/// Confidence per sentiment label, each between 0 and 1.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfidenceScores {
    pub positive: f64,
    #[serde(default)]
    pub neutral: f64,
    pub negative: f64,
}

/// Sentiment of one sentence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceSentiment {
    pub text: String,
    pub sentiment: TextSentiment,
    pub confidence_scores: SentimentConfidenceScores,
    pub offset: u32,
    pub length: u32,
    /// Opinion-mining targets (v3.1 previews, with `opinionMining=true`).
    #[serde(default, alias = "aspects")]
    pub targets: Vec<SentenceTarget>,
    /// Opinion-mining assessments (v3.1 previews, with `opinionMining=true`).
    #[serde(default, alias = "opinions")]
    pub assessments: Vec<SentenceAssessment>,
}

/// Sentiment of one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSentiment {
    pub id: String,
    pub sentiment: TextSentiment,
    pub confidence_scores: SentimentConfidenceScores,
    pub sentences: Vec<SentenceSentiment>,
    #[serde(default)]
    pub warnings: Vec<TextAnalyticsWarning>,
    pub statistics: Option<DocumentStatistics>,
}

/// The target of an opinion, e.g. "food" in "the food was great".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTarget {
    pub text: String,
    pub sentiment: TextSentiment,
    pub confidence_scores: SentimentConfidenceScores,
    pub offset: u32,
    pub length: u32,
    #[serde(default)]
    pub relations: Vec<TargetRelation>,
}

/// An assessment of a target, e.g. "great" in "the food was great".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAssessment {
    pub text: String,
    pub sentiment: TextSentiment,
    pub confidence_scores: SentimentConfidenceScores,
    pub offset: u32,
    pub length: u32,
    pub is_negated: bool,
}

/// A JSON-pointer link from a target to an assessment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRelation {
    /// `"assessment"` or `"target"` (`"opinion"`/`"aspect"` on v3.1-preview.1).
    pub relation_type: String,
    /// JSON pointer, e.g. `"#/documents/0/sentences/0/assessments/0"`.
    #[serde(rename = "ref")]
    pub reference: String,
}

// ---------------------------------------------------------------------------
// Key phrases
// ---------------------------------------------------------------------------

/// Key phrases of one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentKeyPhrases {
    pub id: String,
    pub key_phrases: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<TextAnalyticsWarning>,
    pub statistics: Option<DocumentStatistics>,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A named entity found in a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub text: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub offset: u32,
    pub length: u32,
    pub confidence_score: f64,
}

/// Entities of one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntities {
    pub id: String,
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub warnings: Vec<TextAnalyticsWarning>,
    pub statistics: Option<DocumentStatistics>,
}

/// One occurrence of a linked entity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub confidence_score: f64,
    pub text: String,
    pub offset: u32,
    pub length: u32,
}

/// An entity linked to a knowledge base.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedEntity {
    pub name: String,
    pub matches: Vec<Match>,
    pub language: String,
    /// Identifier in the data source.
    pub id: Option<String>,
    pub url: String,
    /// E.g. `"Wikipedia"`.
    pub data_source: String,
    /// Bing Entity Search identifier (v3.1 previews).
    pub bing_id: Option<String>,
}

/// Linked entities of one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLinkedEntities {
    pub id: String,
    pub entities: Vec<LinkedEntity>,
    #[serde(default)]
    pub warnings: Vec<TextAnalyticsWarning>,
    pub statistics: Option<DocumentStatistics>,
}

/// PII entities of one document (v3.1 previews).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiiDocumentEntities {
    pub id: String,
    /// The input text with every PII entity masked.
    pub redacted_text: Option<String>,
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub warnings: Vec<TextAnalyticsWarning>,
    pub statistics: Option<DocumentStatistics>,
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Restricts PII recognition to a domain (v3.1-preview.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiDomain {
    /// Protected Health Information only.
    Phi,
    /// No domain filter.
    None,
}

impl PiiDomain {
    /// Returns the API string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phi => "phi",
            Self::None => "none",
        }
    }
}

/// How the service counts offsets and lengths (v3.1-preview.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringIndexType {
    /// Unicode text elements (grapheme clusters). The service default.
    #[default]
    TextElementsV8,
    /// Unicode code points, matching Rust `char` counts.
    UnicodeCodePoint,
    /// UTF-16 code units.
    Utf16CodeUnit,
}

impl StringIndexType {
    /// Returns the API string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextElementsV8 => "TextElements_v8",
            Self::UnicodeCodePoint => "UnicodeCodePoint",
            Self::Utf16CodeUnit => "Utf16CodeUnit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_are_sorted_and_unique() {
        for module in [ModelsModule::V3_0, ModelsModule::V3_1Preview1, ModelsModule::V3_1Preview2] {
            let names = module.type_names();
            assert!(
                names.windows(2).all(|w| w[0] < w[1]),
                "{module:?} names must be sorted: {names:?}",
            );
        }
    }

    #[test]
    fn test_pii_models_only_exist_on_previews() {
        assert!(!ModelsModule::V3_0.contains("PiiDocumentEntities"));
        assert!(ModelsModule::V3_1Preview1.contains("PiiDocumentEntities"));
        assert!(ModelsModule::V3_1Preview2.contains("PiiDocumentEntities"));
    }

    #[test]
    fn test_preview_2_parameters_only_on_preview_2() {
        assert!(!ModelsModule::V3_1Preview1.contains("StringIndexType"));
        assert!(ModelsModule::V3_1Preview2.contains("StringIndexType"));
        assert!(!ModelsModule::V3_1Preview1.contains("PiiDomain"));
        assert!(ModelsModule::V3_1Preview2.contains("PiiDomain"));
    }

    #[test]
    fn test_shared_models_exist_everywhere() {
        for module in [ModelsModule::V3_0, ModelsModule::V3_1Preview1, ModelsModule::V3_1Preview2] {
            assert!(module.contains("DocumentSentiment"), "{module:?}");
            assert!(module.contains("MultiLanguageInput"), "{module:?}");
        }
    }

    #[test]
    fn test_api_version_matches_module() {
        assert_eq!(ModelsModule::V3_0.api_version(), ApiVersion::V3_0);
        assert_eq!(ModelsModule::V3_1Preview2.api_version(), ApiVersion::V3_1Preview2);
    }

    #[test]
    fn test_sentiment_response_deserialization() {
        let json = r#"{
            "documents": [{
                "id": "1",
                "sentiment": "positive",
                "confidenceScores": {"positive": 0.98, "neutral": 0.01, "negative": 0.01},
                "sentences": [{
                    "text": "The food was great.",
                    "sentiment": "positive",
                    "confidenceScores": {"positive": 0.98, "neutral": 0.01, "negative": 0.01},
                    "offset": 0,
                    "length": 19
                }],
                "warnings": []
            }],
            "errors": [],
            "modelVersion": "2020-04-01"
        }"#;
        let result: SentimentResponse = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(result.model_version, "2020-04-01");
        assert!(!result.has_errors());
        let doc = &result.documents[0];
        assert_eq!(doc.sentiment, TextSentiment::Positive);
        assert_eq!(doc.sentences[0].length, 19);
        assert!(doc.sentences[0].targets.is_empty());
    }

    #[test]
    fn test_opinion_mining_accepts_preview_1_names() {
        let json = r##"{
            "text": "The food was great.",
            "sentiment": "positive",
            "confidenceScores": {"positive": 0.98, "neutral": 0.01, "negative": 0.01},
            "offset": 0,
            "length": 19,
            "aspects": [{
                "text": "food",
                "sentiment": "positive",
                "confidenceScores": {"positive": 1.0, "negative": 0.0},
                "offset": 4,
                "length": 4,
                "relations": [{"relationType": "opinion", "ref": "#/documents/0/sentences/0/opinions/0"}]
            }],
            "opinions": [{
                "text": "great",
                "sentiment": "positive",
                "confidenceScores": {"positive": 1.0, "negative": 0.0},
                "offset": 13,
                "length": 5,
                "isNegated": false
            }]
        }"##;
        let sentence: SentenceSentiment = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(sentence.targets[0].text, "food");
        assert_eq!(sentence.targets[0].relations[0].relation_type, "opinion");
        assert_eq!(sentence.assessments[0].text, "great");
        assert!(!sentence.assessments[0].is_negated);
    }

    #[test]
    fn test_analysis_result_with_document_errors() {
        let json = r#"{
            "documents": [],
            "errors": [{"id": "1", "error": {"code": "InvalidArgument", "message": "Document text is empty."}}],
            "statistics": {"documentsCount": 1, "validDocumentsCount": 0, "erroneousDocumentsCount": 1, "transactionsCount": 0},
            "modelVersion": "2020-07-01"
        }"#;
        let result: KeyPhraseResult = serde_json::from_str(json).expect("should deserialize");
        assert!(result.has_errors());
        assert_eq!(result.errors[0].id, "1");
        assert_eq!(result.statistics.expect("stats").erroneous_documents_count, 1);
    }

    #[test]
    fn test_linked_entity_deserialization() {
        let json = r#"{
            "name": "Seattle",
            "matches": [{"confidenceScore": 0.21, "text": "Seattle", "offset": 26, "length": 7}],
            "language": "en",
            "id": "Seattle",
            "url": "https://en.wikipedia.org/wiki/Seattle",
            "dataSource": "Wikipedia",
            "bingId": "5fbba6b8-85e1-4d41-9444-d9055436e473"
        }"#;
        let entity: LinkedEntity = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(entity.data_source, "Wikipedia");
        assert_eq!(entity.matches[0].offset, 26);
        assert!(entity.bing_id.is_some());
    }

    #[test]
    fn test_request_parameter_strings() {
        assert_eq!(PiiDomain::Phi.as_str(), "phi");
        assert_eq!(StringIndexType::default().as_str(), "TextElements_v8");
        assert_eq!(StringIndexType::UnicodeCodePoint.as_str(), "UnicodeCodePoint");
    }
}
