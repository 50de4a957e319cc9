//! Credentials accepted by the Text Analytics clients.
//!
//! Cognitive Services accepts either a resource key, sent in the
//! `Ocp-Apim-Subscription-Key` header, or a Microsoft Entra ID bearer token.
//! Token acquisition is left to a caller-supplied [`TokenProvider`].

use crate::error::{TextAnalyticsError, TextAnalyticsResult};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Environment variable read by [`TextAnalyticsCredential::from_env`].
pub const API_KEY_ENV_VAR: &str = "AZURE_TEXT_ANALYTICS_KEY";

/// OAuth scope requested from token providers.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// Header carrying a Cognitive Services resource key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Produces bearer tokens on demand.
///
/// Implement this to plug in any token source (managed identity, a CLI
/// login, a cached token service). The pipeline calls it once per request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a bearer token valid for `scopes`.
    async fn get_token(&self, scopes: &[&str]) -> TextAnalyticsResult<SecretString>;
}

/// Credential types supported by the Text Analytics SDK.
#[derive(Clone)]
pub enum TextAnalyticsCredential {
    /// Cognitive Services resource key.
    ApiKey(SecretString),

    /// Microsoft Entra ID token supplied by a [`TokenProvider`].
    Token(Arc<dyn TokenProvider>),
}

/// A resolved authentication header.
pub struct AuthHeader {
    /// Header name.
    pub name: &'static str,
    /// Header value. Never log this.
    pub value: SecretString,
}

impl TextAnalyticsCredential {
    /// Create a credential from the `AZURE_TEXT_ANALYTICS_KEY` environment variable.
    pub fn from_env() -> TextAnalyticsResult<Self> {
        match std::env::var(API_KEY_ENV_VAR) {
            Ok(key) if !key.is_empty() => Ok(Self::ApiKey(SecretString::from(key))),
            _ => Err(TextAnalyticsError::MissingConfig(format!(
                "credential is required. Set it via builder or {API_KEY_ENV_VAR} env var."
            ))),
        }
    }

    /// Create a resource key credential.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::from(key.into()))
    }

    /// Create a credential backed by a token provider.
    pub fn token_provider(provider: impl TokenProvider + 'static) -> Self {
        Self::Token(Arc::new(provider))
    }

    /// Resolve the credential to an authentication header.
    pub async fn resolve(&self) -> TextAnalyticsResult<AuthHeader> {
        match self {
            Self::ApiKey(key) => {
                if key.expose_secret().is_empty() {
                    return Err(TextAnalyticsError::Auth("API key is empty".into()));
                }
                Ok(AuthHeader {
                    name: SUBSCRIPTION_KEY_HEADER,
                    value: key.clone(),
                })
            }
            Self::Token(provider) => {
                let token = provider.get_token(&[COGNITIVE_SERVICES_SCOPE]).await?;
                Ok(AuthHeader {
                    name: "Authorization",
                    value: SecretString::from(format!("Bearer {}", token.expose_secret())),
                })
            }
        }
    }
}

impl std::fmt::Debug for TextAnalyticsCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => write!(f, "TextAnalyticsCredential::ApiKey(****)"),
            Self::Token(_) => write!(f, "TextAnalyticsCredential::Token(****)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct FixedToken(&'static str);

    #[async_trait]
    impl TokenProvider for FixedToken {
        async fn get_token(&self, scopes: &[&str]) -> TextAnalyticsResult<SecretString> {
            assert_eq!(scopes, [COGNITIVE_SERVICES_SCOPE]);
            Ok(SecretString::from(self.0.to_string()))
        }
    }

    struct FailingToken;

    #[async_trait]
    impl TokenProvider for FailingToken {
        async fn get_token(&self, _scopes: &[&str]) -> TextAnalyticsResult<SecretString> {
            Err(TextAnalyticsError::Auth("no login".into()))
        }
    }

    #[tokio::test]
    async fn test_api_key_resolves_to_subscription_header() {
        let header = TextAnalyticsCredential::api_key("secret-key")
            .resolve()
            .await
            .expect("should resolve");
        assert_eq!(header.name, SUBSCRIPTION_KEY_HEADER);
        assert_eq!(header.value.expose_secret(), "secret-key");
    }

    #[tokio::test]
    async fn test_empty_api_key_is_rejected() {
        let err = TextAnalyticsCredential::api_key("")
            .resolve()
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, TextAnalyticsError::Auth(_)));
    }

    #[tokio::test]
    async fn test_token_provider_resolves_to_bearer() {
        let header = TextAnalyticsCredential::token_provider(FixedToken("tok-123"))
            .resolve()
            .await
            .expect("should resolve");
        assert_eq!(header.name, "Authorization");
        assert_eq!(header.value.expose_secret(), "Bearer tok-123");
    }

    #[tokio::test]
    async fn test_token_provider_errors_propagate() {
        let err = TextAnalyticsCredential::token_provider(FailingToken)
            .resolve()
            .await
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("no login"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = TextAnalyticsCredential::api_key("super-secret");
        let debug = format!("{cred:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("****"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_key() {
        let original = std::env::var(API_KEY_ENV_VAR).ok();
        std::env::set_var(API_KEY_ENV_VAR, "env-key");

        let cred = TextAnalyticsCredential::from_env().expect("should read env");
        assert!(matches!(cred, TextAnalyticsCredential::ApiKey(ref k) if k.expose_secret() == "env-key"));

        match original {
            Some(val) => std::env::set_var(API_KEY_ENV_VAR, val),
            None => std::env::remove_var(API_KEY_ENV_VAR),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_without_key_is_missing_config() {
        let original = std::env::var(API_KEY_ENV_VAR).ok();
        std::env::remove_var(API_KEY_ENV_VAR);

        let err = TextAnalyticsCredential::from_env().expect_err("should fail");
        assert!(matches!(err, TextAnalyticsError::MissingConfig(_)));

        if let Some(val) = original {
            std::env::set_var(API_KEY_ENV_VAR, val);
        }
    }
}
