//! Models of the `v3.1-preview.1` API: `v3.0` plus PII recognition and opinion mining.

pub use super::v3_0::*;
pub use super::{PiiDocumentEntities, PiiResult, SentenceAssessment, SentenceTarget, TargetRelation};

/// Model type names defined by `v3.1-preview.1`, sorted.
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
    "RequestStatistics",
    "SentenceAssessment",
    "SentenceSentiment",
    "SentenceTarget",
    "SentimentConfidenceScores",
    "ServiceErrorDetail",
    "TargetRelation",
    "TextAnalyticsWarning",
    "TextSentiment",
];
