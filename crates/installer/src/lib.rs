//! Prebuilt-archive installation for setup-shiroa.
//!
//! Given an exact version, the [`Installer`] either reuses a cached
//! installation or downloads the platform-appropriate release archive,
//! extracts it, normalizes the directory layout, and registers the
//! result in the tool cache. Any failure is fatal; the cache is only
//! written after extraction and normalization succeed.

pub mod cache;
pub mod download;
pub mod extract;

use std::path::PathBuf;

use reqwest::Client;
use semver::Version;
use tracing::{debug, info};

use setup_shiroa_core::target::{
    archive_extension, check_version_floor, download_url, target_triple,
};
use setup_shiroa_core::{Error, Os, Platform, Result, TOOL};

pub use cache::ToolCache;
pub use download::{download_archive, ensure_extension};
pub use extract::extract_archive;

/// Result of a successful installation.
#[derive(Debug)]
pub struct Installed {
    /// Directory containing the shiroa executable.
    pub path: PathBuf,
    /// Whether the installation was served from the cache.
    pub cache_hit: bool,
}

/// Downloads, extracts, and caches shiroa release archives.
pub struct Installer {
    cache: ToolCache,
    client: Client,
}

impl Default for Installer {
    fn default() -> Self {
        Self::new()
    }
}

impl Installer {
    /// Create an installer with the default tool cache.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend fails to initialize; with default
    /// settings and only a user agent configured this indicates a
    /// broken environment.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            cache: ToolCache::default(),
            client: Client::builder()
                .user_agent("setup-shiroa")
                .build()
                .expect("Failed to create HTTP client - TLS backend initialization failed"),
        }
    }

    /// Create an installer over a specific tool cache.
    #[must_use]
    pub fn with_cache(cache: ToolCache) -> Self {
        let mut installer = Self::new();
        installer.cache = cache;
        installer
    }

    /// Install an exact shiroa version for a platform.
    ///
    /// A cache hit short-circuits before any download request is even
    /// constructed. On a miss the archive is fetched into a scratch
    /// directory, renamed to carry its extension if needed, extracted,
    /// and the tool directory registered in the cache; the cache's
    /// canonical path is returned.
    ///
    /// # Errors
    ///
    /// Fails on versions below the floor, unsupported platforms,
    /// download or extraction failures. Nothing is retried.
    pub async fn install(&self, version: &Version, platform: Platform) -> Result<Installed> {
        check_version_floor(version)?;

        let version_key = version.to_string();
        if let Some(path) = self.cache.find(TOOL, &version_key) {
            info!(%version, ?path, "shiroa retrieved from cache");
            return Ok(Installed {
                path,
                cache_hit: true,
            });
        }

        debug!(%version, "fetching shiroa");

        let target = target_triple(platform)?;
        debug!(target, "determined archive target");

        let extension = archive_extension(platform.os);
        debug!(extension, "determined archive extension");

        let url = download_url(version, platform)?;
        let scratch = tempfile::Builder::new()
            .prefix("setup-shiroa")
            .tempdir()?;

        let downloaded = download_archive(&self.client, &url, scratch.path()).await?;
        let archive = ensure_extension(&downloaded, extension)?;

        let extracted = scratch.path().join("extracted");
        extract_archive(&archive, &extracted)?;
        debug!(%version, ?extracted, "extracted shiroa");

        // Non-windows archives wrap everything in a shiroa-<triple>
        // directory; the windows zip is already the install root.
        let tool_dir = if platform.os == Os::Windows {
            extracted
        } else {
            let inner = extracted.join(format!("{TOOL}-{target}"));
            if !inner.is_dir() {
                return Err(Error::extraction(format!(
                    "archive did not contain expected directory {TOOL}-{target}"
                )));
            }
            inner
        };

        let path = self.cache.add(&tool_dir, TOOL, &version_key)?;
        info!(%version, ?path, "shiroa added to cache");

        Ok(Installed {
            path,
            cache_hit: false,
        })
    }
}
