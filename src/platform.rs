//! Target platform descriptor.
//!
//! One enum replaces the per-platform builder variants: each platform
//! carries the handful of things that actually differ between them (Qt
//! layout under the SDK, where ninja comes from, extra CMake flags,
//! whether a packaging step runs).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::host::{HostInfo, HostOs};

/// The platform a build targets. Always the host platform in practice;
/// kept explicit so argument construction stays a pure function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Option<Platform> {
        match crate::host::current_os() {
            HostOs::Linux => Some(Platform::Linux),
            HostOs::MacOs => Some(Platform::MacOs),
            HostOs::Windows => Some(Platform::Windows),
            HostOs::Other => None,
        }
    }

    /// Short lowercase name, used in release subdirectories.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }

    /// Qt tree location under the SDK root. The SDK pins a different Qt
    /// build per platform.
    pub fn qt_subpath(&self) -> PathBuf {
        match self {
            Platform::Windows => Path::new("qt").join("5.6"),
            Platform::Linux => Path::new("qt").join("maya2016"),
            Platform::MacOs => Path::new("qt").join("maya2017"),
        }
    }

    /// The build tool to invoke. Windows agents carry a pinned ninja.exe
    /// inside the source tree; Unix uses whatever is on PATH.
    pub fn ninja_program(&self, source_dir: &Path) -> PathBuf {
        match self {
            Platform::Windows => source_dir.join("build").join("tools").join("ninja.exe"),
            _ => PathBuf::from("ninja"),
        }
    }

    /// Platform-specific extra CMake flags. CentOS 6.7 agents link libc
    /// statically so the produced binaries run on newer distributions.
    pub fn extra_cmake_flags(&self, host: &HostInfo) -> Vec<String> {
        match self {
            Platform::Linux => {
                let static_libc = host
                    .linux
                    .as_ref()
                    .is_some_and(|d| d.id == "centos" && d.version == "6.7");
                if static_libc {
                    vec!["-DWITH_STATIC_LIBC=ON".to_string()]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Whether the packaging stage produces an artifact on this platform.
    /// Linux release packaging is handled outside this pipeline.
    pub fn packages_artifact(&self) -> bool {
        !matches!(self, Platform::Linux)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(format!(
                "unknown platform `{}` (expected linux, macos or windows)",
                other
            )),
        }
    }
}
