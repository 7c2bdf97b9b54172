//! setup-shiroa action entry point.
//!
//! Resolves the requested shiroa version against the published release
//! catalog, installs the platform-appropriate prebuilt archive (or
//! reuses the tool cache), and publishes the installed directory to the
//! job environment. All failures propagate to the single handler here,
//! which renders the diagnostic and exits non-zero.

mod cli;
mod inputs;
mod runner;

use clap::Parser;
use semver::Version;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use setup_shiroa_core::{Platform, Result, VersionSpec, resolve_version};
use setup_shiroa_github::release_lister;
use setup_shiroa_installer::Installer;

use crate::cli::Cli;
use crate::inputs::Inputs;

fn main() {
    let exit_code = run_with_tokio();
    std::process::exit(exit_code);
}

/// Create the tokio runtime and run to completion.
fn run_with_tokio() -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            // Tracing is not initialized yet at this point in startup.
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Fatal error: failed to create tokio runtime: {e}");
            }
            return 1;
        }
    };

    runtime.block_on(run())
}

/// Top-level error handler: the one place a failure becomes an exit code.
async fn run() -> i32 {
    match real_main().await {
        Ok(()) => 0,
        Err(err) => {
            let report = miette::Report::new(err);
            #[allow(clippy::print_stderr)]
            {
                eprintln!("{report:?}");
            }
            1
        }
    }
}

async fn real_main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let inputs = Inputs::resolve(&cli)?;
    let version = resolve(&inputs).await?;

    let platform = Platform::current()?;
    debug!(os = %platform.os, arch = %platform.arch, "detected platform");

    let installed = Installer::new().install(&version, platform).await?;
    if installed.cache_hit {
        runner::set_output("cache-hit", &installed.path.display().to_string())?;
    }

    runner::add_path(&installed.path)?;
    runner::set_output("shiroa-version", &version.to_string())?;
    info!("shiroa v{version} installed");
    Ok(())
}

/// Turn the version input into an exact version, consulting the release
/// catalog only when the specifier is not already exact.
async fn resolve(inputs: &Inputs) -> Result<Version> {
    match VersionSpec::parse(&inputs.version_spec) {
        VersionSpec::Exact(version) => Ok(version),
        spec => {
            let lister = release_lister(inputs.token.as_deref());
            let releases = lister.list_releases().await?;
            let version = resolve_version(&releases, &spec, inputs.allow_prereleases)?;
            info!("Resolved shiroa version: {version}");
            Ok(version)
        }
    }
}

/// Initialize tracing to stderr. `RUNNER_DEBUG=1` (the runner's step
/// debug switch) forces debug level regardless of the flag.
fn init_tracing(cli: &Cli) {
    let level: tracing::Level = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        tracing::Level::DEBUG
    } else {
        cli.level.into()
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // Ignore the error if tracing is already initialized (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
