//! Toolchain environment configurator.
//!
//! The SDK root bundles a pinned MSVC toolchain plus Qt builds. On
//! Windows the compiler and linker find their headers and libraries
//! through INCLUDE/LIB/PATH, so the configurator derives those variables
//! from fixed subpaths under the SDK root. The result is an explicit
//! mapping attached to external commands as env overrides; the process
//! environment itself is never touched.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::platform::Platform;

/// MSVC include trees under the SDK root.
const MSVC_INCLUDE_SUBPATHS: &[&str] = &[
    "msvs2015/PlatformSDK/Include/shared",
    "msvs2015/PlatformSDK/Include/um",
    "msvs2015/PlatformSDK/Include/winrt",
    "msvs2015/PlatformSDK/Include/ucrt",
    "msvs2015/include",
    "msvs2015/atlmfc/include",
];

/// MSVC library trees under the SDK root.
const MSVC_LIB_SUBPATHS: &[&str] = &[
    "msvs2015/PlatformSDK/Lib/winv6.3/um/x64",
    "msvs2015/PlatformSDK/Lib/ucrt/x64",
    "msvs2015/atlmfc/lib/amd64",
    "msvs2015/lib/amd64",
];

/// Compiler/linker binary directories under the SDK root.
const MSVC_PATH_SUBPATHS: &[&str] = &[
    "msvs2015/bin/amd64",
    "msvs2015/bin",
    "msvs2015/PlatformSDK/bin/x64",
];

/// An ordered mapping from environment-variable name to path fragments.
///
/// Fragments are joined with the Windows path-list separator when the
/// variables are resolved against a base environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainEnv {
    vars: Vec<(String, Vec<PathBuf>)>,
}

impl ToolchainEnv {
    /// Compute the MSVC 2015 variable set for the given SDK root.
    ///
    /// Fails if the SDK root does not exist. The subpaths themselves are
    /// not validated; a partial SDK surfaces as a compiler error later.
    pub fn for_windows(sdk_root: &Path) -> Result<ToolchainEnv> {
        if !sdk_root.exists() {
            return Err(Error::SdkRootNotFound {
                path: sdk_root.to_path_buf(),
            });
        }

        let expand = |subpaths: &[&str]| -> Vec<PathBuf> {
            subpaths.iter().map(|s| sdk_root.join(s)).collect()
        };

        Ok(ToolchainEnv {
            vars: vec![
                ("INCLUDE".to_string(), expand(MSVC_INCLUDE_SUBPATHS)),
                ("LIB".to_string(), expand(MSVC_LIB_SUBPATHS)),
                ("PATH".to_string(), expand(MSVC_PATH_SUBPATHS)),
                (
                    "__MS_VC_INSTALL_PATH".to_string(),
                    vec![sdk_root.join("msvs2015")],
                ),
            ],
        })
    }

    /// Variable names in order, mostly for tests and logging.
    pub fn var_names(&self) -> Vec<&str> {
        self.vars.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Resolve against the current process environment.
    ///
    /// PATH keeps the pre-existing search path after the SDK entries.
    pub fn resolve(&self) -> Vec<(String, String)> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary base environment lookup.
    ///
    /// INCLUDE/LIB are computed wholesale from the SDK root, so
    /// re-resolving reproduces them unchanged. Only PATH consults the
    /// base: fragments already present there are not appended again and
    /// the base value is kept after the SDK entries. Either way, each
    /// SDK-derived fragment appears exactly once however often the
    /// resolution is repeated.
    pub fn resolve_with(&self, base: impl Fn(&str) -> Option<String>) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(key, fragments)| {
                let inherits_base = key == "PATH";
                let existing = if inherits_base {
                    base(key).unwrap_or_default()
                } else {
                    String::new()
                };
                let mut parts: Vec<String> = Vec::new();

                for fragment in fragments {
                    let fragment = fragment.display().to_string();
                    let already_present = existing
                        .split(WINDOWS_PATH_SEPARATOR)
                        .any(|p| p == fragment);
                    if !already_present && !parts.contains(&fragment) {
                        parts.push(fragment);
                    }
                }

                if inherits_base && !existing.is_empty() {
                    parts.push(existing);
                }

                (key.clone(), parts.join(&WINDOWS_PATH_SEPARATOR.to_string()))
            })
            .collect()
    }
}

const WINDOWS_PATH_SEPARATOR: char = ';';

/// Location of the Qt tree the build links against, under the SDK root.
pub fn qt_root(sdk_root: &Path, platform: Platform) -> PathBuf {
    sdk_root.join(platform.qt_subpath())
}
