//! Core types and logic for setup-shiroa.
//!
//! This crate holds everything with nontrivial branching: the version
//! resolution algorithm, the platform/architecture model, the static
//! artifact-target tables, and the shared error type. Network and
//! filesystem collaborators live in the sibling crates.

pub mod error;
pub mod platform;
pub mod release;
pub mod resolver;
pub mod target;

pub use error::{Error, Result};
pub use platform::{Arch, Os, Platform};
pub use release::Release;
pub use resolver::{VersionSpec, resolve_version};

/// The tool this action installs. Used as the cache key prefix and in
/// archive directory names.
pub const TOOL: &str = "shiroa";

/// GitHub owner of the shiroa repository.
pub const REPO_OWNER: &str = "Myriad-Dreamin";

/// GitHub repository name.
pub const REPO_NAME: &str = "shiroa";

/// Anonymous releases endpoint for [`REPO_OWNER`]/[`REPO_NAME`].
#[must_use]
pub fn releases_api_url() -> String {
    format!("https://api.github.com/repos/{REPO_OWNER}/{REPO_NAME}/releases")
}
