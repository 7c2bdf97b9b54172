//! Archive extraction.
//!
//! Dispatch is on the filename suffix: `.zip` goes through the zip
//! extractor, everything else through tar with gzip decompression
//! selected explicitly rather than inferred from the name.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

use setup_shiroa_core::{Error, Result};

/// Extract an archive into `dest`, choosing the extractor by suffix.
///
/// # Errors
///
/// Returns [`Error::Extraction`] when the archive is malformed, plus
/// IO errors from the filesystem.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;

    let is_zip = archive
        .file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with(".zip"));

    if is_zip {
        debug!(?archive, "extracting zip archive");
        extract_zip(archive, dest)
    } else {
        debug!(?archive, "extracting gzip tar ball");
        extract_tar_gz(archive, dest)
    }
}

/// Extract a gzip-compressed tarball. The gzip mode is fixed here, not
/// guessed from the filename.
fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(file);
    let mut tar = Archive::new(decoder);
    tar.unpack(dest)
        .map_err(|e| Error::extraction(format!("failed to unpack tar: {e}")))?;
    Ok(())
}

/// Extract a zip archive, restoring unix modes where present.
fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| Error::extraction(format!("failed to open zip: {e}")))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| Error::extraction(format!("failed to read zip entry: {e}")))?;

        // enclosed_name rejects entries escaping the destination.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            std::fs::write(&outpath, &content)?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = std::fs::metadata(&outpath)?.permissions();
                perms.set_mode(mode);
                std::fs::set_permissions(&outpath, perms)?;
            }
        }
    }

    Ok(())
}
