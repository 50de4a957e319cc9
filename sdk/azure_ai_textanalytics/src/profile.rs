//! Profiles: default API versions per operation group.
//!
//! A profile maps operation-group tags to API version identifiers. A client
//! built without an explicit `api_version` asks its profile which version to
//! use for [`PROFILE_TAG`]. Version strings are checked against the version
//! table when a client resolves them, not when the profile is built.

use std::collections::BTreeMap;

use crate::versions::API_VERSION_TABLE;

/// Operation-group tag the Text Analytics client looks up in its profile.
pub const PROFILE_TAG: &str = "azure.ai.textanalytics.TextAnalyticsClient";

/// A named mapping from operation-group tag to API version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    tags: BTreeMap<String, String>,
    default_version: Option<String>,
}

impl Profile {
    /// Create an empty profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
            default_version: None,
        }
    }

    /// The profile that maps the client tag to the version table's latest entry.
    pub fn latest() -> Self {
        Self::new(format!("{PROFILE_TAG} latest"))
            .with_tag(PROFILE_TAG, API_VERSION_TABLE.latest().version.as_str())
    }

    /// Map `tag` to `api_version`, replacing any previous mapping.
    pub fn with_tag(mut self, tag: impl Into<String>, api_version: impl Into<String>) -> Self {
        self.tags.insert(tag.into(), api_version.into());
        self
    }

    /// Set the version used for tags this profile does not list.
    pub fn with_default_version(mut self, api_version: impl Into<String>) -> Self {
        self.default_version = Some(api_version.into());
        self
    }

    /// The profile's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version for `tag`, falling back to the profile-wide default.
    pub fn version_for(&self, tag: &str) -> Option<&str> {
        self.tags
            .get(tag)
            .or(self.default_version.as_ref())
            .map(String::as_str)
    }

    /// Iterate the explicit tag mappings, sorted by tag.
    pub fn tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

impl Default for Profile {
    fn default() -> Self {
        KnownProfile::Default.profile()
    }
}

/// Profiles built into the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnownProfile {
    /// What a client uses when given nothing else. Same as [`Latest`](Self::Latest).
    #[default]
    Default,
    /// Every tag on the version table's latest entry.
    Latest,
}

impl KnownProfile {
    /// Materialize the profile.
    pub fn profile(self) -> Profile {
        match self {
            Self::Default | Self::Latest => Profile::latest(),
        }
    }
}

impl From<KnownProfile> for Profile {
    fn from(known: KnownProfile) -> Self {
        known.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_profile_maps_tag_to_latest_version() {
        let profile = Profile::latest();
        assert_eq!(profile.version_for(PROFILE_TAG), Some("v3.0"));
        assert_eq!(
            profile.name(),
            "azure.ai.textanalytics.TextAnalyticsClient latest"
        );
    }

    #[test]
    fn test_default_profile_is_latest() {
        assert_eq!(Profile::default(), Profile::latest());
        assert_eq!(Profile::from(KnownProfile::Latest), Profile::latest());
        assert_eq!(KnownProfile::default(), KnownProfile::Default);
    }

    #[test]
    fn test_unknown_tag_without_default_is_none() {
        assert_eq!(Profile::latest().version_for("other.Client"), None);
    }

    #[test]
    fn test_default_version_covers_unlisted_tags() {
        let profile = Profile::new("custom").with_default_version("v3.1-preview.1");
        assert_eq!(profile.version_for(PROFILE_TAG), Some("v3.1-preview.1"));
    }

    #[test]
    fn test_explicit_tag_beats_default_version() {
        let profile = Profile::new("custom")
            .with_default_version("v3.1-preview.1")
            .with_tag(PROFILE_TAG, "v3.1-preview.2");
        assert_eq!(profile.version_for(PROFILE_TAG), Some("v3.1-preview.2"));
    }

    #[test]
    fn test_with_tag_replaces_previous_mapping() {
        let profile = Profile::new("custom")
            .with_tag(PROFILE_TAG, "v3.0")
            .with_tag(PROFILE_TAG, "v3.1-preview.1");
        let tags: Vec<_> = profile.tags().collect();
        assert_eq!(tags, vec![(PROFILE_TAG, "v3.1-preview.1")]);
    }
}
