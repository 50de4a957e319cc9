//! Models of the `v3.1-preview.2` API: `v3.1-preview.1` plus string index
//! types and the PII domain filter.

pub use super::v3_1_preview_1::*;
pub use super::{PiiDomain, StringIndexType};

/// Model type names defined by `v3.1-preview.2`, sorted.
pub const TYPE_NAMES: &[&str] = &[
    "AnalysisResult",
    "DetectedLanguage",
    "DocumentEntities",
    "DocumentError",
    "DocumentKeyPhrases",
    "DocumentLanguage",
    "DocumentLinkedEntities",
    "DocumentSentiment",
    "DocumentStatistics",
    "Entity",
    "InnerError",
    "LanguageInput",
    "LinkedEntity",
    "Match",
    "MultiLanguageInput",
    "PiiDocumentEntities",
    "PiiDomain",
    "RequestStatistics",
    "SentenceAssessment",
    "SentenceSentiment",
    "SentenceTarget",
    "SentimentConfidenceScores",
    "ServiceErrorDetail",
    "StringIndexType",
    "TargetRelation",
    "TextAnalyticsWarning",
    "TextSentiment",
];
