//! Static artifact mapping tables.
//!
//! Release archives are named `shiroa-<target-triple>.<ext>`, where the
//! triple is fixed per (OS, architecture) pair. The mapping is a total
//! match over the closed key sets: every pair outside the published
//! table is an [`Error::UnsupportedTarget`], never a malformed name.

use semver::Version;

use crate::TOOL;
use crate::error::{Error, Result};
use crate::platform::{Arch, Os, Platform};

/// Earliest release shipping prebuilt archives in the current layout.
pub const MIN_VERSION: Version = Version::new(0, 2, 0);

/// Look up the artifact target triple for a platform.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTarget`] when no prebuilt archive is
/// published for the pair.
pub fn target_triple(platform: Platform) -> Result<&'static str> {
    let triple = match (platform.os, platform.arch) {
        (Os::Linux, Arch::Arm64) => "aarch64-unknown-linux-musl",
        (Os::Linux, Arch::Arm) => "arm-unknown-linux-musleabihf",
        (Os::Linux, Arch::Loong64) => "loongarch64-unknown-linux-musl",
        (Os::Linux, Arch::Riscv64) => "riscv64gc-unknown-linux-musl",
        (Os::Linux, Arch::X64) => "x86_64-unknown-linux-musl",
        (Os::Darwin, Arch::Arm64) => "aarch64-apple-darwin",
        (Os::Darwin, Arch::X64) => "x86_64-apple-darwin",
        (Os::Windows, Arch::Arm64) => "aarch64-pc-windows-msvc",
        (Os::Windows, Arch::X64) => "x86_64-pc-windows-msvc",
        _ => return Err(Error::unsupported_target(platform.to_string())),
    };
    Ok(triple)
}

/// Archive extension for a platform: `tar.gz` everywhere except windows.
#[must_use]
pub fn archive_extension(os: Os) -> &'static str {
    match os {
        Os::Linux | Os::Darwin => "tar.gz",
        Os::Windows => "zip",
    }
}

/// Top-level directory name inside the archive: `shiroa-<triple>`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTarget`] for pairs outside the table.
pub fn archive_directory(platform: Platform) -> Result<String> {
    Ok(format!("{TOOL}-{}", target_triple(platform)?))
}

/// Archive filename: `shiroa-<triple>.<ext>`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTarget`] for pairs outside the table.
pub fn archive_filename(platform: Platform) -> Result<String> {
    Ok(format!(
        "{}.{}",
        archive_directory(platform)?,
        archive_extension(platform.os)
    ))
}

/// Release-asset download URL for an exact version on a platform.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTarget`] for pairs outside the table.
pub fn download_url(version: &Version, platform: Platform) -> Result<String> {
    Ok(format!(
        "https://github.com/{}/{}/releases/download/v{version}/{}",
        crate::REPO_OWNER,
        crate::REPO_NAME,
        archive_filename(platform)?
    ))
}

/// Reject versions older than the prebuilt-archive floor.
///
/// # Errors
///
/// Returns [`Error::VersionBelowFloor`] below [`MIN_VERSION`].
pub fn check_version_floor(version: &Version) -> Result<()> {
    if *version < MIN_VERSION {
        return Err(Error::VersionBelowFloor {
            version: version.to_string(),
            floor: MIN_VERSION.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_triple_table() {
        let cases = [
            (Os::Linux, Arch::Arm64, "aarch64-unknown-linux-musl"),
            (Os::Linux, Arch::Arm, "arm-unknown-linux-musleabihf"),
            (Os::Linux, Arch::Loong64, "loongarch64-unknown-linux-musl"),
            (Os::Linux, Arch::Riscv64, "riscv64gc-unknown-linux-musl"),
            (Os::Linux, Arch::X64, "x86_64-unknown-linux-musl"),
            (Os::Darwin, Arch::Arm64, "aarch64-apple-darwin"),
            (Os::Darwin, Arch::X64, "x86_64-apple-darwin"),
            (Os::Windows, Arch::Arm64, "aarch64-pc-windows-msvc"),
            (Os::Windows, Arch::X64, "x86_64-pc-windows-msvc"),
        ];
        for (os, arch, expected) in cases {
            let triple = target_triple(Platform::new(os, arch)).unwrap();
            assert_eq!(triple, expected);
            assert!(!triple.is_empty());
        }
    }

    #[test]
    fn test_target_triple_undefined_pairs_are_errors() {
        for platform in [
            Platform::new(Os::Darwin, Arch::Arm),
            Platform::new(Os::Darwin, Arch::Loong64),
            Platform::new(Os::Darwin, Arch::Riscv64),
            Platform::new(Os::Windows, Arch::Arm),
            Platform::new(Os::Windows, Arch::Loong64),
            Platform::new(Os::Windows, Arch::Riscv64),
        ] {
            let err = target_triple(platform).unwrap_err();
            assert!(matches!(err, Error::UnsupportedTarget { .. }));
            assert!(err.to_string().contains(&platform.to_string()));
        }
    }

    #[test]
    fn test_archive_extension() {
        assert_eq!(archive_extension(Os::Linux), "tar.gz");
        assert_eq!(archive_extension(Os::Darwin), "tar.gz");
        assert_eq!(archive_extension(Os::Windows), "zip");
    }

    #[test]
    fn test_archive_names() {
        let linux = Platform::new(Os::Linux, Arch::X64);
        assert_eq!(
            archive_directory(linux).unwrap(),
            "shiroa-x86_64-unknown-linux-musl"
        );
        assert_eq!(
            archive_filename(linux).unwrap(),
            "shiroa-x86_64-unknown-linux-musl.tar.gz"
        );

        let windows = Platform::new(Os::Windows, Arch::X64);
        assert_eq!(
            archive_filename(windows).unwrap(),
            "shiroa-x86_64-pc-windows-msvc.zip"
        );
    }

    #[test]
    fn test_download_url() {
        let version = Version::new(0, 3, 1);
        let url = download_url(&version, Platform::new(Os::Darwin, Arch::Arm64)).unwrap();
        assert_eq!(
            url,
            "https://github.com/Myriad-Dreamin/shiroa/releases/download/v0.3.1/shiroa-aarch64-apple-darwin.tar.gz"
        );
    }

    #[test]
    fn test_version_floor() {
        assert!(check_version_floor(&Version::new(0, 2, 0)).is_ok());
        assert!(check_version_floor(&Version::new(1, 0, 0)).is_ok());

        let err = check_version_floor(&Version::new(0, 1, 9)).unwrap_err();
        assert!(matches!(err, Error::VersionBelowFloor { .. }));
        assert_eq!(err.to_string(), "shiroa version must be >= 0.2.0, was 0.1.9");
    }

    #[test]
    fn test_version_floor_prerelease_below_floor() {
        // 0.2.0-rc1 precedes 0.2.0 under semver precedence.
        let rc = Version::parse("0.2.0-rc1").unwrap();
        assert!(check_version_floor(&rc).is_err());
    }
}
