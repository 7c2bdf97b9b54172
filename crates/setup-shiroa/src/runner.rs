//! Runner integration: step outputs and PATH publication.
//!
//! The runner exposes two append-only files: `$GITHUB_OUTPUT` for
//! `name=value` step outputs and `$GITHUB_PATH` for directories to
//! prepend to the PATH of subsequent steps. Outside a workflow both
//! variables are unset and publication degrades to a log line.

use std::io::Write;
use std::path::Path;

use setup_shiroa_core::Result;
use tracing::{debug, info};

/// Publish a step output.
///
/// # Errors
///
/// Returns an IO error if the output file cannot be appended.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    let Some(path) = std::env::var_os("GITHUB_OUTPUT") else {
        debug!(name, value, "GITHUB_OUTPUT not set; skipping output");
        return Ok(());
    };
    append_line(Path::new(&path), &format!("{name}={value}"))?;
    debug!(name, value, "set step output");
    Ok(())
}

/// Make an installed directory available on the PATH of later steps.
///
/// # Errors
///
/// Returns an IO error if the path file cannot be appended.
pub fn add_path(dir: &Path) -> Result<()> {
    let Some(path) = std::env::var_os("GITHUB_PATH") else {
        debug!(?dir, "GITHUB_PATH not set; skipping path update");
        return Ok(());
    };
    append_line(Path::new(&path), &dir.display().to_string())?;
    info!(?dir, "added to job PATH");
    Ok(())
}

/// Append one line to a runner command file.
fn append_line(file: &Path, line: &str) -> std::io::Result<()> {
    let mut handle = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)?;
    writeln!(handle, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_output_appends_name_value_lines() {
        let temp = TempDir::new().unwrap();
        let output_file = temp.path().join("output");

        temp_env::with_var("GITHUB_OUTPUT", Some(&output_file), || {
            set_output("shiroa-version", "0.3.1").unwrap();
            set_output("cache-hit", "/opt/hostedtoolcache/shiroa/0.3.1/x64").unwrap();
        });

        let contents = std::fs::read_to_string(&output_file).unwrap();
        assert_eq!(
            contents,
            "shiroa-version=0.3.1\ncache-hit=/opt/hostedtoolcache/shiroa/0.3.1/x64\n"
        );
    }

    #[test]
    fn test_set_output_without_runner_is_a_no_op() {
        temp_env::with_var("GITHUB_OUTPUT", None::<&str>, || {
            set_output("shiroa-version", "0.3.1").unwrap();
        });
    }

    #[test]
    fn test_add_path_appends_directory() {
        let temp = TempDir::new().unwrap();
        let path_file = temp.path().join("path");

        temp_env::with_var("GITHUB_PATH", Some(&path_file), || {
            add_path(Path::new("/opt/hostedtoolcache/shiroa/0.3.1/x64")).unwrap();
        });

        let contents = std::fs::read_to_string(&path_file).unwrap();
        assert_eq!(contents, "/opt/hostedtoolcache/shiroa/0.3.1/x64\n");
    }

    #[test]
    fn test_add_path_without_runner_is_a_no_op() {
        temp_env::with_var("GITHUB_PATH", None::<&str>, || {
            add_path(Path::new("/tmp/anywhere")).unwrap();
        });
    }
}
