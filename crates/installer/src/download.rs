//! Archive download and filename normalization.

use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::debug;

use setup_shiroa_core::{Error, Result};

/// Download a release archive into `dest_dir`.
///
/// The file is stored under an extensionless scratch name, the way a
/// runner's download helper would; [`ensure_extension`] normalizes it
/// before extraction.
///
/// # Errors
///
/// Returns [`Error::Download`] on a network failure or non-success
/// status. No retries are attempted.
pub async fn download_archive(client: &Client, url: &str, dest_dir: &Path) -> Result<PathBuf> {
    debug!(%url, "downloading archive");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::download(url, e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::download(url, format!("HTTP {}", response.status())));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::download(url, e.to_string()))?;

    let path = dest_dir.join("archive");
    std::fs::write(&path, &bytes)?;

    debug!(?path, bytes = bytes.len(), "downloaded archive");
    Ok(path)
}

/// Ensure the archive filename carries the expected extension.
///
/// Extraction dispatches purely on the filename suffix, so a file that
/// does not already end with `extension` is renamed in place (same
/// directory, never moved or copied) to append `.<extension>`.
///
/// # Errors
///
/// Returns an IO error if the rename fails.
pub fn ensure_extension(path: &Path, extension: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.ends_with(extension) {
        return Ok(path.to_path_buf());
    }

    debug!(?path, extension, "renaming archive to include extension");
    let renamed = path.with_file_name(format!("{name}.{extension}"));
    std::fs::rename(path, &renamed)?;
    Ok(renamed)
}
