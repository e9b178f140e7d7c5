//! `slipway info` command

use anyhow::Result;

use slipway::host::{HostInfo, HostOs};

pub fn execute() -> Result<()> {
    let host = HostInfo::probe();

    println!("OS: {}", host.os);
    if host.os == HostOs::Linux {
        if let Some(ref distro) = host.linux {
            println!("Distribution: {} {}", distro.name, distro.version);
        }
    }
    println!("Architecture: {}", host.arch);
    println!("Hostname: {}", host.hostname);
    println!("Username: {}", host.username);

    Ok(())
}
