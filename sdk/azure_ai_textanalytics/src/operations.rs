//! Operations, one [`OperationsModule`] variant per API version.
//!
//! Every operation POSTs a batch of documents to a path under the client's
//! base URL and decodes an [`AnalysisResult`](crate::models::AnalysisResult).
//! The variants differ in which operations and query parameters they accept;
//! anything the bound version lacks fails with
//! [`TextAnalyticsError::UnsupportedOperation`] before a request is sent.

use azure_ai_textanalytics_core::error::{TextAnalyticsError, TextAnalyticsResult};
use azure_ai_textanalytics_core::models::{LanguageBatchInput, MultiLanguageBatchInput};
use azure_ai_textanalytics_core::pipeline::PipelineClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

use crate::models::{
    EntitiesResult, EntityLinkingResult, KeyPhraseResult, LanguageInput, LanguageResult,
    MultiLanguageInput, PiiDomain, PiiResult, SentimentResponse, StringIndexType,
};
use crate::versions::ApiVersion;

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

pub(crate) const LANGUAGES_PATH: &str = "/languages";
pub(crate) const SENTIMENT_PATH: &str = "/sentiment";
pub(crate) const KEY_PHRASES_PATH: &str = "/keyPhrases";
pub(crate) const ENTITIES_GENERAL_PATH: &str = "/entities/recognition/general";
pub(crate) const ENTITIES_LINKING_PATH: &str = "/entities/linking";
pub(crate) const ENTITIES_PII_PATH: &str = "/entities/recognition/pii";

const V3_0_OPERATIONS: &[&str] = &[
    "entities_linking",
    "entities_recognition_general",
    "key_phrases",
    "languages",
    "sentiment",
];

const V3_1_OPERATIONS: &[&str] = &[
    "entities_linking",
    "entities_recognition_general",
    "entities_recognition_pii",
    "key_phrases",
    "languages",
    "sentiment",
];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options shared by every operation.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Model version to use, e.g. `"latest"` or `"2020-04-01"`.
    pub model_version: Option<String>,
    /// Ask the service for document and batch statistics.
    pub show_stats: bool,
    /// Offset/length unit. Only `v3.1-preview.2` entity and sentiment
    /// operations accept it.
    pub string_index_type: Option<StringIndexType>,
}

impl AnalyzeOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model version.
    pub fn model_version(mut self, model_version: impl Into<String>) -> Self {
        self.model_version = Some(model_version.into());
        self
    }

    /// Request statistics.
    pub fn show_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }

    /// Set the offset/length unit.
    pub fn string_index_type(mut self, string_index_type: StringIndexType) -> Self {
        self.string_index_type = Some(string_index_type);
        self
    }
}

/// Options for [`OperationsModule::sentiment`].
#[derive(Debug, Clone, Default)]
pub struct SentimentOptions {
    /// Model version, statistics and string index type.
    pub analyze: AnalyzeOptions,
    /// Return targets and assessments per sentence (v3.1 previews).
    pub opinion_mining: bool,
}

impl SentimentOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shared options.
    pub fn analyze(mut self, analyze: AnalyzeOptions) -> Self {
        self.analyze = analyze;
        self
    }

    /// Enable opinion mining.
    pub fn opinion_mining(mut self, opinion_mining: bool) -> Self {
        self.opinion_mining = opinion_mining;
        self
    }
}

/// Options for [`OperationsModule::entities_recognition_pii`].
#[derive(Debug, Clone, Default)]
pub struct PiiOptions {
    /// Model version, statistics and string index type.
    pub analyze: AnalyzeOptions,
    /// Restrict results to a domain (v3.1-preview.2).
    pub domain: Option<PiiDomain>,
}

impl PiiOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shared options.
    pub fn analyze(mut self, analyze: AnalyzeOptions) -> Self {
        self.analyze = analyze;
        self
    }

    /// Set the domain filter.
    pub fn domain(mut self, domain: PiiDomain) -> Self {
        self.domain = Some(domain);
        self
    }
}

// ---------------------------------------------------------------------------
// Operations module
// ---------------------------------------------------------------------------

/// The operations bound to one API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationsModule {
    /// Operations of `v3.0`.
    V3_0,
    /// Operations of `v3.1-preview.1`.
    V3_1Preview1,
    /// Operations of `v3.1-preview.2`.
    V3_1Preview2,
}

impl OperationsModule {
    /// The version these operations belong to.
    pub fn api_version(self) -> ApiVersion {
        match self {
            Self::V3_0 => ApiVersion::V3_0,
            Self::V3_1Preview1 => ApiVersion::V3_1Preview1,
            Self::V3_1Preview2 => ApiVersion::V3_1Preview2,
        }
    }

    /// Names of the operations this version offers, sorted.
    pub fn operation_names(self) -> &'static [&'static str] {
        match self {
            Self::V3_0 => V3_0_OPERATIONS,
            Self::V3_1Preview1 | Self::V3_1Preview2 => V3_1_OPERATIONS,
        }
    }

    /// Returns `true` if the version offers `operation`.
    pub fn supports(self, operation: &str) -> bool {
        self.operation_names().binary_search(&operation).is_ok()
    }

    /// Returns `true` if `sentiment` accepts `opinionMining`.
    pub fn supports_opinion_mining(self) -> bool {
        !matches!(self, Self::V3_0)
    }

    /// Returns `true` if entity and sentiment operations accept `stringIndexType`.
    pub fn supports_string_index_type(self) -> bool {
        matches!(self, Self::V3_1Preview2)
    }

    /// Returns `true` if PII recognition accepts `domain`.
    pub fn supports_pii_domain(self) -> bool {
        matches!(self, Self::V3_1Preview2)
    }

    /// Detect the language of each document.
    pub async fn languages(
        self,
        pipeline: &PipelineClient,
        documents: &[LanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<LanguageResult> {
        self.reject_string_index_type("languages", options)?;
        validate_ids(documents.iter().map(|d| d.id.as_str()))?;
        let query = self.query("languages", options)?;
        send(pipeline, LANGUAGES_PATH, &query, &LanguageBatchInput { documents }).await
    }

    /// Score the sentiment of each document and sentence.
    pub async fn sentiment(
        self,
        pipeline: &PipelineClient,
        documents: &[MultiLanguageInput],
        options: &SentimentOptions,
    ) -> TextAnalyticsResult<SentimentResponse> {
        if options.opinion_mining && !self.supports_opinion_mining() {
            return Err(self.unsupported("opinion_mining"));
        }
        validate_ids(documents.iter().map(|d| d.id.as_str()))?;
        let mut query = self.query("sentiment", &options.analyze)?;
        if options.opinion_mining {
            query.push(("opinionMining", "true".to_string()));
        }
        send(pipeline, SENTIMENT_PATH, &query, &MultiLanguageBatchInput { documents }).await
    }

    /// Extract key phrases from each document.
    pub async fn key_phrases(
        self,
        pipeline: &PipelineClient,
        documents: &[MultiLanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<KeyPhraseResult> {
        self.reject_string_index_type("key_phrases", options)?;
        validate_ids(documents.iter().map(|d| d.id.as_str()))?;
        let query = self.query("key_phrases", options)?;
        send(pipeline, KEY_PHRASES_PATH, &query, &MultiLanguageBatchInput { documents }).await
    }

    /// Recognize named entities in each document.
    pub async fn entities_recognition_general(
        self,
        pipeline: &PipelineClient,
        documents: &[MultiLanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<EntitiesResult> {
        validate_ids(documents.iter().map(|d| d.id.as_str()))?;
        let query = self.query("entities_recognition_general", options)?;
        send(pipeline, ENTITIES_GENERAL_PATH, &query, &MultiLanguageBatchInput { documents }).await
    }

    /// Link entities in each document to a knowledge base.
    pub async fn entities_linking(
        self,
        pipeline: &PipelineClient,
        documents: &[MultiLanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<EntityLinkingResult> {
        validate_ids(documents.iter().map(|d| d.id.as_str()))?;
        let query = self.query("entities_linking", options)?;
        send(pipeline, ENTITIES_LINKING_PATH, &query, &MultiLanguageBatchInput { documents }).await
    }

    /// Recognize personally identifiable information in each document.
    pub async fn entities_recognition_pii(
        self,
        pipeline: &PipelineClient,
        documents: &[MultiLanguageInput],
        options: &PiiOptions,
    ) -> TextAnalyticsResult<PiiResult> {
        if !self.supports("entities_recognition_pii") {
            return Err(self.unsupported("entities_recognition_pii"));
        }
        if options.domain.is_some() && !self.supports_pii_domain() {
            return Err(self.unsupported("pii_domain"));
        }
        validate_ids(documents.iter().map(|d| d.id.as_str()))?;
        let mut query = self.query("entities_recognition_pii", &options.analyze)?;
        if let Some(domain) = options.domain {
            query.push(("domain", domain.as_str().to_string()));
        }
        send(pipeline, ENTITIES_PII_PATH, &query, &MultiLanguageBatchInput { documents }).await
    }

    /// Build the query parameters shared by every operation.
    fn query(
        self,
        operation: &'static str,
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<Vec<(&'static str, String)>> {
        let mut query = Vec::new();

        if let Some(ref model_version) = options.model_version {
            query.push(("model-version", model_version.clone()));
        }
        if options.show_stats {
            query.push(("showStats", "true".to_string()));
        }
        if let Some(string_index_type) = options.string_index_type {
            if !self.supports_string_index_type() {
                return Err(self.unsupported("string_index_type"));
            }
            query.push(("stringIndexType", string_index_type.as_str().to_string()));
        }

        tracing::trace!(operation, params = query.len(), "query built");
        Ok(query)
    }

    /// `languages` and `key_phrases` never take `stringIndexType`.
    fn reject_string_index_type(
        self,
        operation: &'static str,
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<()> {
        if options.string_index_type.is_some() {
            return Err(TextAnalyticsError::Builder(format!(
                "string_index_type is not accepted by `{operation}`"
            )));
        }
        Ok(())
    }

    fn unsupported(self, operation: &'static str) -> TextAnalyticsError {
        TextAnalyticsError::UnsupportedOperation {
            operation,
            api_version: self.api_version().to_string(),
        }
    }
}

/// Reject empty batches, empty ids, and duplicate ids.
fn validate_ids<'a>(ids: impl Iterator<Item = &'a str>) -> TextAnalyticsResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(TextAnalyticsError::Builder("document id must not be empty".into()));
        }
        if !seen.insert(id) {
            return Err(TextAnalyticsError::Builder(format!("duplicate document id `{id}`")));
        }
    }
    if seen.is_empty() {
        return Err(TextAnalyticsError::Builder("documents must not be empty".into()));
    }
    Ok(())
}

async fn send<B: Serialize, R: DeserializeOwned>(
    pipeline: &PipelineClient,
    path: &str,
    query: &[(&str, String)],
    body: &B,
) -> TextAnalyticsResult<R> {
    let response = pipeline.post(path, query, body).await?;
    let result = response.json::<R>().await?;
    tracing::debug!(path, "operation completed");
    Ok(result)
}
