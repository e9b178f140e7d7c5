//! Host environment probe.
//!
//! Read-only queries about the machine the build runs on. None of these
//! fail: when a piece of information is unavailable the corresponding
//! field is left empty.

use std::fmt;

/// Operating system family of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl HostOs {
    /// Short lowercase name, used in artifact paths.
    pub fn name(&self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::MacOs => "macos",
            HostOs::Windows => "windows",
            HostOs::Other => "unknown",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Linux distribution descriptor, from `/etc/os-release`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinuxDistribution {
    /// Machine-oriented id, e.g. `centos`.
    pub id: String,
    /// Human-readable name, e.g. `CentOS Linux`.
    pub name: String,
    /// Version string, e.g. `6.7`.
    pub version: String,
}

/// Everything the build pipeline needs to know about the host.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub os: HostOs,
    pub arch: String,
    pub hostname: String,
    pub username: String,
    pub linux: Option<LinuxDistribution>,
}

impl HostInfo {
    /// Probe the running system once, at startup.
    pub fn probe() -> Self {
        let os = current_os();
        HostInfo {
            os,
            arch: current_architecture(),
            hostname: current_hostname(),
            username: current_username(),
            linux: if os == HostOs::Linux {
                linux_distribution()
            } else {
                None
            },
        }
    }
}

/// Operating system family of the running process.
pub fn current_os() -> HostOs {
    match std::env::consts::OS {
        "linux" => HostOs::Linux,
        "macos" => HostOs::MacOs,
        "windows" => HostOs::Windows,
        _ => HostOs::Other,
    }
}

/// CPU architecture, e.g. `x86_64`.
pub fn current_architecture() -> String {
    std::env::consts::ARCH.to_string()
}

/// Hostname of the machine, or empty if it cannot be determined.
pub fn current_hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        if !name.is_empty() {
            return name;
        }
    }
    if let Ok(name) = std::env::var("COMPUTERNAME") {
        if !name.is_empty() {
            return name;
        }
    }
    // Linux exposes the kernel hostname directly.
    if let Ok(name) = std::fs::read_to_string("/proc/sys/kernel/hostname") {
        return name.trim().to_string();
    }
    String::new()
}

/// Login name of the invoking user, or empty if unavailable.
pub fn current_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

/// Linux distribution name and version, when running on Linux.
pub fn linux_distribution() -> Option<LinuxDistribution> {
    let contents = std::fs::read_to_string("/etc/os-release").ok()?;
    Some(parse_os_release(&contents))
}

fn parse_os_release(contents: &str) -> LinuxDistribution {
    let mut distro = LinuxDistribution::default();

    for line in contents.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "ID" => distro.id = value,
            "NAME" => distro.name = value,
            "VERSION_ID" => distro.version = value,
            _ => {}
        }
    }

    distro
}
