//! Action input reading.
//!
//! The runner delivers each input as an `INPUT_<NAME>` environment
//! variable, with the name uppercased and spaces replaced by
//! underscores. CLI flags take precedence over the environment so the
//! binary stays usable outside a workflow.

use setup_shiroa_core::{Error, Result};
use tracing::debug;

use crate::cli::Cli;

/// Default version specifier when none is supplied.
const DEFAULT_VERSION_SPEC: &str = "latest";

/// The action's effective configuration.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Optional API token; presence selects authenticated listing.
    pub token: Option<String>,
    /// Raw version specifier (`latest`, range, or exact version).
    pub version_spec: String,
    /// Whether pre-release versions participate in resolution.
    pub allow_prereleases: bool,
}

impl Inputs {
    /// Merge CLI flags over the `INPUT_*` environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a boolean input outside the
    /// accepted set.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let token = cli
            .github_token
            .clone()
            .or_else(|| action_input("github-token"));
        debug!(
            authenticated = token.is_some(),
            "using {}",
            if token.is_some() {
                "authentication"
            } else {
                "no authentication"
            }
        );

        let version_spec = cli
            .shiroa_version
            .clone()
            .or_else(|| action_input("shiroa-version"))
            .unwrap_or_else(|| DEFAULT_VERSION_SPEC.to_string());

        let allow_prereleases = match cli.allow_prereleases {
            Some(value) => value,
            None => action_bool_input("allow-prereleases")?.unwrap_or(false),
        };

        Ok(Self {
            token,
            version_spec,
            allow_prereleases,
        })
    }
}

/// Environment variable name for an action input.
fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read a string input; empty or unset yields `None`.
#[must_use]
pub fn action_input(name: &str) -> Option<String> {
    let value = std::env::var(input_var(name)).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a boolean input using the YAML 1.2 core truthy/falsy set.
///
/// # Errors
///
/// Returns [`Error::Config`] for any other value.
pub fn action_bool_input(name: &str) -> Result<Option<bool>> {
    let Some(value) = action_input(name) else {
        return Ok(None);
    };
    match value.as_str() {
        "true" | "True" | "TRUE" => Ok(Some(true)),
        "false" | "False" | "FALSE" => Ok(Some(false)),
        other => Err(Error::config(format!(
            "Input '{name}' is not a boolean: got '{other}', expected true | True | TRUE | false | False | FALSE"
        ))),
    }
}
