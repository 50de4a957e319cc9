//! Models of the `v3.0` API.

pub use super::{
    AnalysisResult, DetectedLanguage, DocumentEntities, DocumentError, DocumentKeyPhrases,
    DocumentLanguage, DocumentLinkedEntities, DocumentSentiment, DocumentStatistics, Entity,
    EntitiesResult, EntityLinkingResult, InnerError, KeyPhraseResult, LanguageInput,
    LanguageResult, LinkedEntity, Match, MultiLanguageInput, RequestStatistics,
    SentenceSentiment, SentimentConfidenceScores, SentimentResponse, ServiceErrorDetail,
    TextAnalyticsWarning, TextSentiment,
};

/// Model type names defined by `v3.0`, sorted. Result aliases are not listed.
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
    "RequestStatistics",
    "SentenceSentiment",
    "SentimentConfidenceScores",
    "ServiceErrorDetail",
    "TextAnalyticsWarning",
    "TextSentiment",
];
