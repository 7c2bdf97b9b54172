//! Version resolution: loose specifier to exact published version.
//!
//! Mirrors npm-semver's `maxSatisfying` semantics: candidates come from
//! the release catalog, `latest` means any version, and pre-releases
//! only participate when explicitly allowed.

use semver::{Version, VersionReq};
use tracing::debug;

use crate::error::{Error, Result};
use crate::release::Release;

/// A parsed version specifier from the `shiroa-version` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// The literal token `latest`: any published version qualifies.
    Latest,
    /// A full version. Resolution is skipped and the value used as-is,
    /// without verifying that such a release exists.
    Exact(Version),
    /// Anything else is interpreted as a semver range expression.
    Range(String),
}

impl VersionSpec {
    /// Classify a raw specifier string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "latest" {
            return Self::Latest;
        }
        match Version::parse(raw) {
            Ok(version) => Self::Exact(version),
            Err(_) => Self::Range(raw.to_string()),
        }
    }

    /// Whether this specifier needs catalog resolution at all.
    #[must_use]
    pub fn needs_resolution(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }
}

impl std::fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Exact(version) => write!(f, "{version}"),
            Self::Range(range) => write!(f, "{range}"),
        }
    }
}

/// Resolve a specifier to the maximum satisfying published version.
///
/// Candidates are release tags with the marker character stripped;
/// syntactically invalid tags are discarded. When `allow_prereleases`
/// is false, versions carrying pre-release identifiers are excluded
/// even if they would otherwise satisfy the range. Ordering follows
/// semver precedence exactly.
///
/// # Errors
///
/// Returns [`Error::UnresolvedVersion`] when no candidate satisfies
/// the specifier (including an unparseable range, which nothing can
/// satisfy).
pub fn resolve_version(
    releases: &[Release],
    spec: &VersionSpec,
    allow_prereleases: bool,
) -> Result<Version> {
    debug!(
        spec = %spec,
        allow_prereleases,
        releases = releases.len(),
        "resolving version"
    );

    let candidates = releases
        .iter()
        .filter_map(Release::candidate_version)
        .filter(|v| allow_prereleases || v.pre.is_empty());

    let resolved = match spec {
        // Exact specifiers never consult the catalog; resolution is a
        // no-op returning the version unchanged.
        VersionSpec::Exact(version) => return Ok(version.clone()),
        VersionSpec::Latest => candidates.max(),
        VersionSpec::Range(range) => {
            let Ok(req) = VersionReq::parse(range) else {
                return Err(Error::unresolved_version(range));
            };
            candidates
                .filter(|v| range_matches(&req, v, allow_prereleases))
                .max()
        }
    };

    let resolved = resolved.ok_or_else(|| Error::unresolved_version(spec.to_string()))?;

    debug!(spec = %spec, version = %resolved, "resolved version");
    Ok(resolved)
}

/// Range matching with opt-in pre-release inclusion.
///
/// `VersionReq::matches` only admits a pre-release when a comparator
/// carries one for the same release triple. With inclusion enabled,
/// matching switches to `matches_prerelease`, which compares the full
/// candidate against the desugared range bounds under semver
/// precedence, the way npm's `includePrerelease` does: `1.5.0-rc.1`
/// satisfies `^1.0.0`, but `1.0.0-beta` precedes the lower bound and
/// does not.
fn range_matches(req: &VersionReq, version: &Version, allow_prereleases: bool) -> bool {
    if allow_prereleases {
        req.matches_prerelease(version)
    } else {
        req.matches(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn releases(tags: &[&str]) -> Vec<Release> {
        tags.iter().map(|t| Release::from_tag(*t)).collect()
    }

    #[test]
    fn test_spec_parse() {
        assert_eq!(VersionSpec::parse("latest"), VersionSpec::Latest);
        assert_eq!(
            VersionSpec::parse("0.3.1"),
            VersionSpec::Exact(Version::new(0, 3, 1))
        );
        assert_eq!(
            VersionSpec::parse("1.2.3-beta"),
            VersionSpec::Exact(Version::parse("1.2.3-beta").unwrap())
        );
        assert_eq!(
            VersionSpec::parse("^1.0.0"),
            VersionSpec::Range("^1.0.0".into())
        );
        assert_eq!(VersionSpec::parse("0.3"), VersionSpec::Range("0.3".into()));
    }

    #[test]
    fn test_exact_spec_skips_resolution() {
        assert!(!VersionSpec::parse("0.3.1").needs_resolution());
        assert!(VersionSpec::parse("latest").needs_resolution());
        assert!(VersionSpec::parse("^0.3").needs_resolution());
    }

    #[test]
    fn test_exact_is_a_no_op_even_without_matching_release() {
        // The documented shortcut: no catalog verification for exact versions.
        let spec = VersionSpec::parse("9.9.9");
        let resolved = resolve_version(&[], &spec, false).unwrap();
        assert_eq!(resolved.to_string(), "9.9.9");
    }

    #[test]
    fn test_latest_excludes_prereleases_by_default() {
        let catalog = releases(&["v1.0.0", "v2.0.0", "v2.1.0-beta"]);
        let resolved = resolve_version(&catalog, &VersionSpec::Latest, false).unwrap();
        assert_eq!(resolved.to_string(), "2.0.0");
    }

    #[test]
    fn test_latest_includes_prereleases_when_allowed() {
        let catalog = releases(&["v1.0.0", "v2.0.0", "v2.1.0-beta"]);
        let resolved = resolve_version(&catalog, &VersionSpec::Latest, true).unwrap();
        assert_eq!(resolved.to_string(), "2.1.0-beta");
    }

    #[test]
    fn test_range_picks_maximum_satisfying() {
        let catalog = releases(&["v1.0.0", "v1.5.0", "v2.0.0"]);
        let spec = VersionSpec::parse("^1.0.0");
        let resolved = resolve_version(&catalog, &spec, false).unwrap();
        assert_eq!(resolved.to_string(), "1.5.0");
    }

    #[test]
    fn test_range_with_prereleases_allowed() {
        let catalog = releases(&["v1.0.0", "v1.5.0", "v1.6.0-rc.1", "v2.0.0"]);
        let spec = VersionSpec::parse("^1.0.0");
        let resolved = resolve_version(&catalog, &spec, true).unwrap();
        assert_eq!(resolved.to_string(), "1.6.0-rc.1");
    }

    #[test]
    fn test_prerelease_never_wins_when_disallowed() {
        // Numerically greatest candidate is a pre-release.
        let catalog = releases(&["v1.0.0", "v1.9.0-alpha"]);
        let spec = VersionSpec::parse("^1.0.0");
        let resolved = resolve_version(&catalog, &spec, false).unwrap();
        assert_eq!(resolved.to_string(), "1.0.0");
    }

    #[test]
    fn test_prerelease_below_range_floor_is_excluded() {
        // 1.0.0-beta precedes the ^1.0.0 lower bound under semver
        // precedence; inclusion widens matching, never the bounds.
        let catalog = releases(&["v1.0.0-beta"]);
        let spec = VersionSpec::parse("^1.0.0");
        let err = resolve_version(&catalog, &spec, true).unwrap_err();
        assert!(matches!(err, Error::UnresolvedVersion { .. }));
    }

    #[test]
    fn test_prerelease_of_next_major_is_excluded() {
        // 2.0.0-rc1 sits outside ^1.0.0's desugared upper bound.
        let catalog = releases(&["v1.2.0", "v2.0.0-rc1"]);
        let spec = VersionSpec::parse("^1.0.0");
        let resolved = resolve_version(&catalog, &spec, true).unwrap();
        assert_eq!(resolved.to_string(), "1.2.0");
    }

    #[test]
    fn test_invalid_tags_are_discarded() {
        let catalog = releases(&["nightly", "v1.2.0", "release-3", "v1.4.0"]);
        let resolved = resolve_version(&catalog, &VersionSpec::Latest, false).unwrap();
        assert_eq!(resolved.to_string(), "1.4.0");
    }

    #[test]
    fn test_no_satisfying_version_is_fatal() {
        let catalog = releases(&["v1.0.0", "v1.5.0"]);
        let spec = VersionSpec::parse("^2.0.0");
        let err = resolve_version(&catalog, &spec, false).unwrap_err();
        assert!(matches!(err, Error::UnresolvedVersion { .. }));
        assert_eq!(err.to_string(), "shiroa ^2.0.0 could not be resolved");
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let err = resolve_version(&[], &VersionSpec::Latest, true).unwrap_err();
        assert!(matches!(err, Error::UnresolvedVersion { .. }));
    }

    #[test]
    fn test_unparseable_range_is_unresolved() {
        let catalog = releases(&["v1.0.0"]);
        let spec = VersionSpec::Range("not a range".into());
        let err = resolve_version(&catalog, &spec, false).unwrap_err();
        assert!(matches!(err, Error::UnresolvedVersion { .. }));
    }

    #[test]
    fn test_semver_precedence_ordering() {
        // Pre-release identifiers compare per the semver spec.
        let catalog = releases(&["v2.1.0-alpha", "v2.1.0-alpha.1", "v2.1.0-beta"]);
        let resolved = resolve_version(&catalog, &VersionSpec::Latest, true).unwrap();
        assert_eq!(resolved.to_string(), "2.1.0-beta");
    }
}
