//! Release descriptors from the remote catalog.

use semver::Version;
use serde::Deserialize;

/// One published release from the GitHub API.
///
/// Resolution is driven entirely by the tag; the rest of the API
/// payload is ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Git tag of the release, e.g. `v0.3.1`.
    pub tag_name: String,
}

impl Release {
    /// Create a release descriptor from a tag, for tests and fixtures.
    #[must_use]
    pub fn from_tag(tag: impl Into<String>) -> Self {
        Self {
            tag_name: tag.into(),
        }
    }

    /// The candidate version carried by this release, if any.
    ///
    /// Strips the one-character tag marker (`v0.3.1` -> `0.3.1`) and
    /// parses the remainder; tags that are not valid semantic versions
    /// are discarded from resolution.
    #[must_use]
    pub fn candidate_version(&self) -> Option<Version> {
        let stripped = self.tag_name.get(1..)?;
        Version::parse(stripped).ok()
    }
}
