//! Error types shared across the setup-shiroa crates.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for setup-shiroa operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or installing shiroa.
///
/// Every variant is fatal to the run; helpers return these up to the
/// binary's single top-level handler, which renders the diagnostic and
/// exits non-zero. Nothing here is retried internally.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The release catalog could not be listed or parsed.
    #[error("Failed to list releases from {url}: {message}")]
    #[diagnostic(
        code(setup_shiroa::release_listing),
        help("This may be caused by API rate limit exceeded; set the github-token input to authenticate")
    )]
    ReleaseListing {
        /// The endpoint that was queried.
        url: String,
        /// Underlying failure description.
        message: String,
    },

    /// No published release satisfies the requested specifier.
    #[error("shiroa {spec} could not be resolved")]
    #[diagnostic(
        code(setup_shiroa::unresolved_version),
        help("Check the shiroa-version input against the published releases")
    )]
    UnresolvedVersion {
        /// The specifier as supplied by the caller.
        spec: String,
    },

    /// The requested version predates the prebuilt-archive layout.
    #[error("shiroa version must be >= {floor}, was {version}")]
    #[diagnostic(code(setup_shiroa::version_floor))]
    VersionBelowFloor {
        /// The rejected version.
        version: String,
        /// The minimum supported version.
        floor: String,
    },

    /// A version string did not parse as a semantic version.
    #[error("Invalid version '{version}': {message}")]
    #[diagnostic(code(setup_shiroa::invalid_version))]
    InvalidVersion {
        /// The offending string.
        version: String,
        /// Parser message.
        message: String,
    },

    /// No prebuilt archive exists for this platform/architecture pair.
    #[error("No prebuilt shiroa archive for {platform}")]
    #[diagnostic(code(setup_shiroa::unsupported_target))]
    UnsupportedTarget {
        /// The platform-arch pair, or the raw OS/arch string when it did
        /// not map to a known key at all.
        platform: String,
    },

    /// Downloading the release archive failed.
    #[error("Failed to download {url}: {message}")]
    #[diagnostic(code(setup_shiroa::download))]
    Download {
        /// The archive URL.
        url: String,
        /// Underlying failure description.
        message: String,
    },

    /// Unpacking the downloaded archive failed.
    #[error("Failed to extract archive: {message}")]
    #[diagnostic(code(setup_shiroa::extraction))]
    Extraction {
        /// Underlying failure description.
        message: String,
    },

    /// Reading or writing action inputs/outputs failed.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(setup_shiroa::config))]
    Config {
        /// What was wrong.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    #[diagnostic(code(setup_shiroa::io))]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    #[diagnostic(code(setup_shiroa::json))]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a release-listing error.
    #[must_use]
    pub fn release_listing(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReleaseListing {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved-version error.
    #[must_use]
    pub fn unresolved_version(spec: impl Into<String>) -> Self {
        Self::UnresolvedVersion { spec: spec.into() }
    }

    /// Create an invalid-version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported-target error.
    #[must_use]
    pub fn unsupported_target(platform: impl Into<String>) -> Self {
        Self::UnsupportedTarget {
            platform: platform.into(),
        }
    }

    /// Create a download error.
    #[must_use]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
