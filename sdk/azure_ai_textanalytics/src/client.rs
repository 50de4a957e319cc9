//! The multi-API-version Text Analytics client.
//!
//! [`TextAnalyticsClient`] resolves an API version once, at construction, and
//! stays bound to it. The version comes from an explicit `api_version`, or
//! else from the client's [`Profile`] (by default, the version table's latest
//! entry). The resolved entry supplies the base URL and the
//! [`OperationsModule`] every call is delegated to.
//!
//! # Examples
//!
//! ## Pinning a version
//! ```rust,no_run
//! use azure_ai_textanalytics::client::TextAnalyticsClient;
//! use azure_ai_textanalytics::models::MultiLanguageInput;
//! use azure_ai_textanalytics::operations::SentimentOptions;
//! use azure_ai_textanalytics_core::auth::TextAnalyticsCredential;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TextAnalyticsClient::builder()
//!     .endpoint("https://westus.api.cognitive.microsoft.com")
//!     .credential(TextAnalyticsCredential::api_key("your-key"))
//!     .api_version("v3.1-preview.1")
//!     .build()?;
//!
//! let docs = [MultiLanguageInput::new("1", "The food was great.").with_language("en")];
//! let result = client
//!     .sentiment(&docs, &SentimentOptions::new().opinion_mining(true))
//!     .await?;
//! println!("{:?}", result.documents[0].sentiment);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using a profile
//! ```rust,no_run
//! use azure_ai_textanalytics::client::TextAnalyticsClient;
//! use azure_ai_textanalytics::profile::{Profile, PROFILE_TAG};
//! use azure_ai_textanalytics_core::auth::TextAnalyticsCredential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let profile = Profile::new("my-cloud").with_tag(PROFILE_TAG, "v3.0");
//! let client = TextAnalyticsClient::builder()
//!     .endpoint("https://westus.api.cognitive.microsoft.com")
//!     .credential(TextAnalyticsCredential::api_key("your-key"))
//!     .profile(profile)
//!     .build()?;
//! assert_eq!(client.api_version().as_str(), "v3.0");
//! # Ok(())
//! # }
//! ```

use azure_ai_textanalytics_core::auth::TextAnalyticsCredential;
use azure_ai_textanalytics_core::error::{TextAnalyticsError, TextAnalyticsResult};
use azure_ai_textanalytics_core::pipeline::{
    PipelineClient, PipelineConfig, RetryPolicy, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT,
};
use reqwest::Client as HttpClient;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::models::{
    EntitiesResult, EntityLinkingResult, KeyPhraseResult, LanguageInput, LanguageResult,
    ModelsModule, MultiLanguageInput, PiiResult, SentimentResponse,
};
use crate::operations::{AnalyzeOptions, OperationsModule, PiiOptions, SentimentOptions};
use crate::profile::{Profile, PROFILE_TAG};
use crate::versions::{ApiVersion, ApiVersionEntry, API_VERSION_TABLE};

/// Environment variable read when no endpoint is given to the builder.
pub const ENDPOINT_ENV_VAR: &str = "AZURE_TEXT_ANALYTICS_ENDPOINT";

/// Lifecycle of a client.
///
/// `Uninitialized` and `Constructing` are the builder's states; a built
/// client is `Active` until closed. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Uninitialized,
    Constructing,
    Active,
    Closed,
}

impl ClientState {
    /// Returns the lowercase name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Constructing => "constructing",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Text Analytics client bound to one API version.
///
/// The client owns its HTTP pipeline. [`close`](Self::close) releases it and
/// dropping the client closes it too, so a client scoped to a block is
/// released on every exit path. After `close`, every operation fails with
/// [`TextAnalyticsError::InvalidState`].
///
/// Independent clients share no mutable state and may be used from
/// different tasks at once.
#[derive(Debug)]
pub struct TextAnalyticsClient {
    entry: &'static ApiVersionEntry,
    endpoint: String,
    profile: Profile,
    pipeline: PipelineClient,
    state: ClientState,
}

/// Builder for constructing a [`TextAnalyticsClient`].
///
/// Use [`TextAnalyticsClient::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct TextAnalyticsClientBuilder {
    endpoint: Option<String>,
    credential: Option<TextAnalyticsCredential>,
    api_version: Option<String>,
    profile: Option<Profile>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
}

impl TextAnalyticsClient {
    /// Create a new builder for configuring a `TextAnalyticsClient`.
    pub fn builder() -> TextAnalyticsClientBuilder {
        TextAnalyticsClientBuilder::default()
    }

    /// Create a client on the default profile's version.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::InvalidEndpoint`] if `endpoint` is empty
    /// or not a valid URL.
    pub fn new(
        endpoint: impl Into<String>,
        credential: TextAnalyticsCredential,
    ) -> TextAnalyticsResult<Self> {
        Self::builder()
            .endpoint(endpoint)
            .credential(credential)
            .build()
    }

    /// Return the (operations, models) pair for a version.
    ///
    /// `None` means the default profile's version. This only reads the
    /// static version table.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::UnsupportedVersion`] if the version is
    /// not in the table.
    pub fn resolve_models(
        api_version: Option<&str>,
    ) -> TextAnalyticsResult<(OperationsModule, ModelsModule)> {
        let entry = API_VERSION_TABLE.resolve(api_version, &Profile::default(), PROFILE_TAG)?;
        Ok((entry.operations, entry.models))
    }

    /// Return the models module for a version (`None` for the default profile's).
    pub fn models(api_version: Option<&str>) -> TextAnalyticsResult<ModelsModule> {
        Self::resolve_models(api_version).map(|(_, models)| models)
    }

    /// The API version this client is bound to.
    pub fn api_version(&self) -> ApiVersion {
        self.entry.version
    }

    /// The resolved base URL, e.g. `https://x/text/analytics/v3.0`.
    pub fn base_url(&self) -> &Url {
        self.pipeline.base_url()
    }

    /// The endpoint the client was built with.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The profile the client was built with.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The operations bound to this client's version.
    pub fn operations(&self) -> OperationsModule {
        self.entry.operations
    }

    /// The models of this client's version.
    pub fn models_module(&self) -> ModelsModule {
        self.entry.models
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Returns `true` once the client has been closed.
    pub fn is_closed(&self) -> bool {
        self.state == ClientState::Closed
    }

    /// Release the HTTP pipeline.
    ///
    /// Idempotent: closing a closed client does nothing.
    pub fn close(&mut self) {
        if self.state == ClientState::Closed {
            return;
        }
        self.pipeline.close();
        self.state = ClientState::Closed;
        tracing::debug!(api_version = %self.entry.version, "text analytics client closed");
    }

    fn active(&self, operation: &'static str) -> TextAnalyticsResult<&PipelineClient> {
        match self.state {
            ClientState::Active => Ok(&self.pipeline),
            state => Err(TextAnalyticsError::InvalidState {
                operation,
                state: state.as_str(),
            }),
        }
    }

    /// Detect the language of each document.
    ///
    /// # Tracing
    ///
    /// Emits a span named `textanalytics::languages` with fields `api_version`
    /// and `documents`.
    #[tracing::instrument(
        name = "textanalytics::languages",
        skip(self, documents, options),
        fields(api_version = %self.entry.version, documents = documents.len())
    )]
    pub async fn languages(
        &self,
        documents: &[LanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<LanguageResult> {
        let pipeline = self.active("languages")?;
        self.entry
            .operations
            .languages(pipeline, documents, options)
            .await
    }

    /// Score the sentiment of each document.
    ///
    /// Opinion mining requires a v3.1 preview version.
    #[tracing::instrument(
        name = "textanalytics::sentiment",
        skip(self, documents, options),
        fields(api_version = %self.entry.version, documents = documents.len())
    )]
    pub async fn sentiment(
        &self,
        documents: &[MultiLanguageInput],
        options: &SentimentOptions,
    ) -> TextAnalyticsResult<SentimentResponse> {
        let pipeline = self.active("sentiment")?;
        self.entry
            .operations
            .sentiment(pipeline, documents, options)
            .await
    }

    /// Extract key phrases.
    #[tracing::instrument(
        name = "textanalytics::key_phrases",
        skip(self, documents, options),
        fields(api_version = %self.entry.version, documents = documents.len())
    )]
    pub async fn key_phrases(
        &self,
        documents: &[MultiLanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<KeyPhraseResult> {
        let pipeline = self.active("key_phrases")?;
        self.entry
            .operations
            .key_phrases(pipeline, documents, options)
            .await
    }

    /// Recognize named entities.
    #[tracing::instrument(
        name = "textanalytics::entities_recognition_general",
        skip(self, documents, options),
        fields(api_version = %self.entry.version, documents = documents.len())
    )]
    pub async fn entities_recognition_general(
        &self,
        documents: &[MultiLanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<EntitiesResult> {
        let pipeline = self.active("entities_recognition_general")?;
        self.entry
            .operations
            .entities_recognition_general(pipeline, documents, options)
            .await
    }

    /// Link entities to a knowledge base.
    #[tracing::instrument(
        name = "textanalytics::entities_linking",
        skip(self, documents, options),
        fields(api_version = %self.entry.version, documents = documents.len())
    )]
    pub async fn entities_linking(
        &self,
        documents: &[MultiLanguageInput],
        options: &AnalyzeOptions,
    ) -> TextAnalyticsResult<EntityLinkingResult> {
        let pipeline = self.active("entities_linking")?;
        self.entry
            .operations
            .entities_linking(pipeline, documents, options)
            .await
    }

    /// Recognize personally identifiable information.
    ///
    /// Only v3.1 preview versions offer this operation; on `v3.0` it fails
    /// with [`TextAnalyticsError::UnsupportedOperation`].
    #[tracing::instrument(
        name = "textanalytics::entities_recognition_pii",
        skip(self, documents, options),
        fields(api_version = %self.entry.version, documents = documents.len())
    )]
    pub async fn entities_recognition_pii(
        &self,
        documents: &[MultiLanguageInput],
        options: &PiiOptions,
    ) -> TextAnalyticsResult<PiiResult> {
        let pipeline = self.active("entities_recognition_pii")?;
        self.entry
            .operations
            .entities_recognition_pii(pipeline, documents, options)
            .await
    }
}

impl Drop for TextAnalyticsClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl TextAnalyticsClientBuilder {
    /// Set the Cognitive Services endpoint, e.g.
    /// `https://westus.api.cognitive.microsoft.com`.
    ///
    /// If not set, the builder will check the `AZURE_TEXT_ANALYTICS_ENDPOINT`
    /// environment variable.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the credential to use for authentication.
    ///
    /// If not set, the builder will use [`TextAnalyticsCredential::from_env()`].
    pub fn credential(mut self, credential: TextAnalyticsCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Pin the API version. Takes precedence over the profile.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the profile consulted when no API version is pinned.
    ///
    /// Defaults to [`Profile::default()`].
    pub fn profile(mut self, profile: impl Into<Profile>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set a custom HTTP client.
    ///
    /// **Note:** If you provide a custom HTTP client, any timeout configuration
    /// via [`connect_timeout`](Self::connect_timeout) or
    /// [`read_timeout`](Self::read_timeout) will be ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout, covering the whole request/response cycle.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the retry policy for transient errors.
    ///
    /// Defaults to 3 retries with 500ms initial backoff.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// The state of a client that has not been built yet.
    pub fn state(&self) -> ClientState {
        ClientState::Uninitialized
    }

    /// Build the `TextAnalyticsClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint is provided and `AZURE_TEXT_ANALYTICS_ENDPOINT` is not set
    /// - The endpoint URL is empty or invalid
    /// - No credential is provided and `AZURE_TEXT_ANALYTICS_KEY` is not set
    /// - The pinned or profile-supplied API version is not available
    pub fn build(self) -> TextAnalyticsResult<TextAnalyticsClient> {
        tracing::trace!(state = %ClientState::Constructing, "building text analytics client");

        let profile = self.profile.unwrap_or_default();
        let entry = API_VERSION_TABLE.resolve(self.api_version.as_deref(), &profile, PROFILE_TAG)?;
        tracing::debug!(
            api_version = %entry.version,
            pinned = self.api_version.is_some(),
            profile = profile.name(),
            "resolved API version",
        );

        let endpoint = self
            .endpoint
            .or_else(|| std::env::var(ENDPOINT_ENV_VAR).ok())
            .ok_or_else(|| {
                TextAnalyticsError::MissingConfig(format!(
                    "endpoint is required. Set it via builder or {ENDPOINT_ENV_VAR} env var."
                ))
            })?;
        let base_url = entry.base_url(&endpoint)?;

        let credential = match self.credential {
            Some(credential) => credential,
            None => TextAnalyticsCredential::from_env()?,
        };

        let config = PipelineConfig {
            credential,
            retry_policy: self.retry_policy.unwrap_or_default(),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT),
            http_client: self.http_client,
        };
        let pipeline = PipelineClient::new(base_url, config)?;

        Ok(TextAnalyticsClient {
            entry,
            endpoint,
            profile,
            pipeline,
            state: ClientState::Active,
        })
    }
}
