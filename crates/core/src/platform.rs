//! Platform and architecture identification.
//!
//! The keys here mirror the naming the release archives use: `darwin`
//! rather than `macos`, `x64` rather than `x86_64`. Detection goes
//! through [`Platform::current`], which maps the values reported by
//! `std::env::consts` and turns anything outside the closed sets into
//! an explicit error instead of a malformed archive name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Platform identifier combining OS and architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system key.
    pub os: Os,
    /// CPU architecture key.
    pub arch: Arch,
}

impl Platform {
    /// Create a new platform.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Detect the platform of the current host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTarget`] when the host OS or CPU
    /// architecture is outside the closed key sets.
    pub fn current() -> Result<Self> {
        Self::from_host(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map raw `std::env::consts` style OS/arch strings to a platform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTarget`] for unknown values.
    pub fn from_host(os: &str, arch: &str) -> Result<Self> {
        let os = Os::from_host(os).ok_or_else(|| Error::unsupported_target(format!("{os}-{arch}")))?;
        let arch =
            Arch::from_host(arch).ok_or_else(|| Error::unsupported_target(format!("{os}-{arch}")))?;
        Ok(Self { os, arch })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Operating system key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Linux (musl archives).
    Linux,
    /// macOS.
    Darwin,
    /// Windows (MSVC archives).
    Windows,
}

impl Os {
    /// Map a `std::env::consts::OS` value to a key.
    #[must_use]
    pub fn from_host(s: &str) -> Option<Self> {
        match s {
            "linux" => Some(Self::Linux),
            "macos" | "darwin" => Some(Self::Darwin),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Darwin => write!(f, "darwin"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// CPU architecture key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit ARM.
    Arm64,
    /// 32-bit ARM (hard-float).
    Arm,
    /// LoongArch 64-bit.
    Loong64,
    /// RISC-V 64-bit.
    Riscv64,
    /// x86-64.
    X64,
}

impl Arch {
    /// Map a `std::env::consts::ARCH` value to a key.
    #[must_use]
    pub fn from_host(s: &str) -> Option<Self> {
        match s {
            "aarch64" | "arm64" => Some(Self::Arm64),
            "arm" => Some(Self::Arm),
            "loongarch64" | "loong64" => Some(Self::Loong64),
            "riscv64" => Some(Self::Riscv64),
            "x86_64" | "x64" => Some(Self::X64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arm64 => write!(f, "arm64"),
            Self::Arm => write!(f, "arm"),
            Self::Loong64 => write!(f, "loong64"),
            Self::Riscv64 => write!(f, "riscv64"),
            Self::X64 => write!(f, "x64"),
        }
    }
}
