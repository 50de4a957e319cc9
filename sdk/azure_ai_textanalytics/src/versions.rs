//! The table of Text Analytics API versions this SDK ships.
//!
//! Each [`ApiVersionEntry`] ties a version identifier to its base URL
//! template, its [`OperationsModule`] and its [`ModelsModule`]. The table is a
//! `static` and never changes, so lookups are pure and deterministic and can
//! be made from any thread.
//!
//! ```rust
//! use azure_ai_textanalytics::versions::{ApiVersion, API_VERSION_TABLE};
//!
//! let entry = API_VERSION_TABLE.get("v3.1-preview.1").expect("shipped version");
//! assert_eq!(entry.version, ApiVersion::V3_1Preview1);
//! assert_eq!(
//!     entry.base_url("https://westus.api.cognitive.microsoft.com").unwrap().as_str(),
//!     "https://westus.api.cognitive.microsoft.com/text/analytics/v3.1-preview.1",
//! );
//! ```

use azure_ai_textanalytics_core::error::{TextAnalyticsError, TextAnalyticsResult};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::models::ModelsModule;
use crate::operations::OperationsModule;
use crate::profile::Profile;

/// Placeholder substituted with the caller's endpoint in URL templates.
pub const ENDPOINT_PLACEHOLDER: &str = "{Endpoint}";

/// A Text Analytics REST API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// `v3.0`, the generally available version.
    V3_0,
    /// `v3.1-preview.1`: adds PII recognition and opinion mining.
    V3_1Preview1,
    /// `v3.1-preview.2`: adds `stringIndexType` and the PII `domain` filter.
    V3_1Preview2,
}

impl ApiVersion {
    /// Every shipped version, oldest first.
    pub const ALL: [ApiVersion; 3] = [Self::V3_0, Self::V3_1Preview1, Self::V3_1Preview2];

    /// Returns the identifier used on the wire and in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V3_0 => "v3.0",
            Self::V3_1Preview1 => "v3.1-preview.1",
            Self::V3_1Preview2 => "v3.1-preview.2",
        }
    }

    /// Returns `true` for preview versions.
    pub fn is_preview(self) -> bool {
        !matches!(self, Self::V3_0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = TextAnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| TextAnalyticsError::UnsupportedVersion(s.to_string()))
    }
}

/// One row of the version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersionEntry {
    /// The version identifier.
    pub version: ApiVersion,
    /// Base URL with an `{Endpoint}` placeholder.
    pub base_url_template: &'static str,
    /// Operations bound to this version.
    pub operations: OperationsModule,
    /// Models defined by this version.
    pub models: ModelsModule,
}

impl ApiVersionEntry {
    /// Substitute `endpoint` into the URL template.
    ///
    /// A trailing `/` on the endpoint is dropped first, so
    /// `https://x/` and `https://x` give the same base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::InvalidEndpoint`] if the endpoint is
    /// empty, not an http(s) URL, or carries credentials, a query or a
    /// fragment.
    pub fn base_url(&self, endpoint: &str) -> TextAnalyticsResult<Url> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(TextAnalyticsError::invalid_endpoint("endpoint must not be empty"));
        }

        let parsed = Url::parse(endpoint)
            .map_err(|e| TextAnalyticsError::invalid_endpoint_with_source("invalid endpoint URL", e))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TextAnalyticsError::invalid_endpoint(format!(
                    "unsupported URL scheme `{other}`"
                )))
            }
        }
        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(TextAnalyticsError::invalid_endpoint(
                "endpoint must not contain credentials",
            ));
        }
        if parsed.query().is_some() {
            return Err(TextAnalyticsError::invalid_endpoint(
                "endpoint must not contain a query string",
            ));
        }
        if parsed.fragment().is_some() {
            return Err(TextAnalyticsError::invalid_endpoint(
                "endpoint must not contain a fragment",
            ));
        }

        let raw = self.base_url_template.replace(ENDPOINT_PLACEHOLDER, endpoint);
        Url::parse(&raw)
            .map_err(|e| TextAnalyticsError::invalid_endpoint_with_source("invalid endpoint URL", e))
    }
}

/// Ordered, immutable mapping from version identifier to [`ApiVersionEntry`].
#[derive(Debug)]
pub struct ApiVersionTable {
    entries: &'static [ApiVersionEntry],
    latest: usize,
}

/// Every version this SDK ships. `v3.0` is the declared latest: previews are opt-in.
pub static API_VERSION_TABLE: ApiVersionTable = ApiVersionTable {
    entries: &[
        ApiVersionEntry {
            version: ApiVersion::V3_0,
            base_url_template: "{Endpoint}/text/analytics/v3.0",
            operations: OperationsModule::V3_0,
            models: ModelsModule::V3_0,
        },
        ApiVersionEntry {
            version: ApiVersion::V3_1Preview1,
            base_url_template: "{Endpoint}/text/analytics/v3.1-preview.1",
            operations: OperationsModule::V3_1Preview1,
            models: ModelsModule::V3_1Preview1,
        },
        ApiVersionEntry {
            version: ApiVersion::V3_1Preview2,
            base_url_template: "{Endpoint}/text/analytics/v3.1-preview.2",
            operations: OperationsModule::V3_1Preview2,
            models: ModelsModule::V3_1Preview2,
        },
    ],
    latest: 0,
};

impl ApiVersionTable {
    /// Look up a version by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::UnsupportedVersion`] carrying `api_version`
    /// if the table has no such entry.
    pub fn get(&self, api_version: &str) -> TextAnalyticsResult<&ApiVersionEntry> {
        self.entries
            .iter()
            .find(|e| e.version.as_str() == api_version)
            .ok_or_else(|| TextAnalyticsError::UnsupportedVersion(api_version.to_string()))
    }

    /// The entry the table declares as latest.
    pub fn latest(&self) -> &ApiVersionEntry {
        &self.entries[self.latest]
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ApiVersionEntry> {
        self.entries.iter()
    }

    /// Number of shipped versions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick the entry for a client.
    ///
    /// An explicit `api_version` wins. Otherwise `profile` is consulted with
    /// `tag`; a profile that names no version for the tag falls back to the
    /// table's latest entry.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::UnsupportedVersion`] if the explicit or
    /// profile-supplied identifier is not in the table.
    pub fn resolve(
        &self,
        api_version: Option<&str>,
        profile: &Profile,
        tag: &str,
    ) -> TextAnalyticsResult<&ApiVersionEntry> {
        match api_version.or_else(|| profile.version_for(tag)) {
            Some(version) => self.get(version),
            None => Ok(self.latest()),
        }
    }

    /// Return the (operations, models) pair for `api_version`.
    ///
    /// # Errors
    ///
    /// Returns [`TextAnalyticsError::UnsupportedVersion`] if the identifier is
    /// not in the table.
    pub fn resolve_models(
        &self,
        api_version: &str,
    ) -> TextAnalyticsResult<(OperationsModule, ModelsModule)> {
        let entry = self.get(api_version)?;
        Ok((entry.operations, entry.models))
    }
}

impl<'a> IntoIterator for &'a ApiVersionTable {
    type Item = &'a ApiVersionEntry;
    type IntoIter = std::slice::Iter<'a, ApiVersionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
