//! Local tool cache keyed by (tool, version).
//!
//! Layout matches the hosted-runner tool cache so entries survive
//! across steps of a job:
//!
//! ```text
//! <root>/
//! └── shiroa/
//!     └── 0.3.1/
//!         ├── x86_64/            # installed directory
//!         └── x86_64.complete    # completion marker
//! ```
//!
//! An entry without its marker is treated as absent, so a run that
//! failed mid-copy never poisons the cache. The root comes from
//! `$RUNNER_TOOL_CACHE` on a runner and falls back to the user cache
//! directory for local runs. Entries are never destroyed here; the
//! runner owns that lifecycle.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use setup_shiroa_core::Result;

/// Name of the runner-provided cache root variable.
const RUNNER_TOOL_CACHE: &str = "RUNNER_TOOL_CACHE";

/// Local on-disk tool cache.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
    arch: String,
}

impl Default for ToolCache {
    fn default() -> Self {
        let root = std::env::var_os(RUNNER_TOOL_CACHE).map_or_else(
            || {
                dirs::cache_dir()
                    .unwrap_or_else(|| PathBuf::from(".cache"))
                    .join("setup-shiroa")
                    .join("tools")
            },
            PathBuf::from,
        );
        Self::new(root)
    }
}

impl ToolCache {
    /// Create a cache at the specified root directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Get the cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical directory for a cached (tool, version) entry.
    #[must_use]
    pub fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version).join(&self.arch)
    }

    /// Marker written once an entry is fully populated.
    #[must_use]
    pub fn marker_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(version)
            .join(format!("{}.complete", self.arch))
    }

    /// Look up a cached installation.
    ///
    /// Only complete entries count; a directory without its marker is
    /// a cache miss.
    #[must_use]
    pub fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        if dir.is_dir() && self.marker_path(tool, version).is_file() {
            trace!(tool, version, ?dir, "cache hit");
            Some(dir)
        } else {
            trace!(tool, version, "cache miss");
            None
        }
    }

    /// Register an installed directory under (tool, version).
    ///
    /// The source directory is copied into the canonical cache location
    /// and the completion marker is written last. Returns the canonical
    /// path, which becomes the final installed path.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the copy fails; no marker is written in
    /// that case.
    pub fn add(&self, source: &Path, tool: &str, version: &str) -> Result<PathBuf> {
        let dest = self.entry_dir(tool, version);

        // Clear any leftover from a previous failed run.
        if dest.exists() {
            std::fs::remove_dir_all(&dest)?;
        }
        copy_dir_all(source, &dest)?;
        std::fs::write(self.marker_path(tool, version), b"")?;

        debug!(tool, version, ?dest, "registered in tool cache");
        Ok(dest)
    }
}

/// Recursively copy a directory, preserving file permissions.
fn copy_dir_all(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
