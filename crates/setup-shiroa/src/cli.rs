//! Command-line interface.
//!
//! On a runner the action inputs arrive as `INPUT_*` environment
//! variables (see [`crate::inputs`]); the flags here take precedence
//! so the binary can also be driven directly for local debugging.

use clap::{Parser, ValueEnum};

/// Install a prebuilt shiroa release and add it to the job PATH.
#[derive(Parser, Debug)]
#[command(name = "setup-shiroa", version, about)]
pub struct Cli {
    /// Version specifier: `latest`, a semver range, or an exact version.
    #[arg(long, help = "Version specifier: latest, a semver range, or an exact version")]
    pub shiroa_version: Option<String>,

    /// Include pre-release versions during resolution.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Include pre-release versions during resolution"
    )]
    pub allow_prereleases: Option<bool>,

    /// GitHub API token for authenticated release listing.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        default_value = "info",
        value_enum,
        help = "Set logging level"
    )]
    pub level: LogLevel,
}

/// Logging verbosity, mapped onto tracing levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Diagnostic trace lines (what `ACTIONS_STEP_DEBUG` shows).
    Debug,
    /// Progress and results.
    Info,
    /// Problems that do not fail the run.
    Warn,
    /// Failures only.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["setup-shiroa"]);
        assert!(cli.shiroa_version.is_none());
        assert!(cli.allow_prereleases.is_none());
        assert_eq!(cli.level, LogLevel::Info);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "setup-shiroa",
            "--shiroa-version",
            "^0.3",
            "--allow-prereleases",
            "-L",
            "debug",
        ]);
        assert_eq!(cli.shiroa_version.as_deref(), Some("^0.3"));
        assert_eq!(cli.allow_prereleases, Some(true));
        assert_eq!(cli.level, LogLevel::Debug);
    }

    #[test]
    fn test_allow_prereleases_explicit_false() {
        let cli = Cli::parse_from(["setup-shiroa", "--allow-prereleases", "false"]);
        assert_eq!(cli.allow_prereleases, Some(false));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }
}
