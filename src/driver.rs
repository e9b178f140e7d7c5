//! Platform build driver.
//!
//! Drives the strictly linear Configure → Build → Package pipeline for a
//! resolved [`BuildConfig`]. Argument vectors are constructed by pure
//! methods; all process spawning goes through an [`Executor`], which is a
//! [`DryRunExecutor`] in test mode.

use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::host::{HostInfo, HostOs};
use crate::platform::Platform;
use crate::toolchain::{qt_root, ToolchainEnv};
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::process::{find_cmake, find_ninja, Executor, ExternalCommand};

/// Orchestrates one build of the rendering server.
pub struct BuildDriver<'a> {
    config: &'a BuildConfig,
    platform: Platform,
    host: &'a HostInfo,
}

impl<'a> BuildDriver<'a> {
    pub fn new(config: &'a BuildConfig, platform: Platform, host: &'a HostInfo) -> Self {
        BuildDriver {
            config,
            platform,
            host,
        }
    }

    /// Print the build-information banner.
    pub fn print_info(&self) {
        let c = self.config;
        println!();
        println!("Build information:");
        println!("OS: {}", self.host.os);
        if self.host.os == HostOs::Linux {
            if let Some(ref distro) = self.host.linux {
                println!("Distribution: {} {}", distro.name, distro.version);
            }
        }
        println!("Architecture: {}", self.host.arch);
        println!(
            "Target: {} {} ({})",
            c.project, c.version, c.branch_hash
        );
        println!("Source directory:  {}", c.source_dir.display());
        println!("Build directory:   {}", c.build_dir.display());
        println!("Install directory: {}", c.install_dir.display());
        if let Some(ref release) = c.release_dir {
            println!("Release directory: {}", release.display());
        }
        println!();
    }

    /// Env overrides both tool invocations need. Only Windows routes the
    /// toolchain through INCLUDE/LIB/PATH.
    fn tool_env(&self) -> Result<Vec<(String, String)>> {
        match self.platform {
            Platform::Windows => {
                Ok(ToolchainEnv::for_windows(&self.config.sdk_dir)?.resolve())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Check that both external tools are actually available before a
    /// real run. Dry runs and export-only skip this.
    pub fn check_tools(&self) -> Result<()> {
        if find_cmake().is_none() {
            return Err(Error::ToolNotFound { tool: "cmake" });
        }
        match self.platform {
            Platform::Windows => {
                if !self
                    .platform
                    .ninja_program(&self.config.source_dir)
                    .exists()
                {
                    return Err(Error::ToolNotFound { tool: "ninja" });
                }
            }
            _ => {
                if find_ninja().is_none() {
                    return Err(Error::ToolNotFound { tool: "ninja" });
                }
            }
        }
        Ok(())
    }

    /// Construct the cmake invocation. Pure: no filesystem access beyond
    /// what resolution already validated.
    pub fn configure_command(&self) -> Result<ExternalCommand> {
        let c = self.config;

        let mut cmd = ExternalCommand::new("cmake")
            .cwd(&c.build_dir)
            .arg("-G")
            .arg("Ninja");

        if let Some(ref cc) = c.cc {
            cmd = cmd.arg(format!("-DCMAKE_C_COMPILER={}", cc));
        }
        if let Some(ref cxx) = c.cxx {
            cmd = cmd.arg(format!("-DCMAKE_CXX_COMPILER={}", cxx));
        }

        cmd = cmd
            .arg(format!("-DCMAKE_BUILD_TYPE={}", c.build_type))
            .arg(format!("-DCMAKE_INSTALL_PREFIX={}", c.install_dir.display()));

        if let Some(ref appsdk) = c.appsdk_path {
            cmd = cmd.arg(format!("-DAPPSDK_PATH={}", appsdk.display()));
        }
        if let Some(ref version) = c.appsdk_version {
            cmd = cmd.arg(format!("-DAPPSDK_VERSION={}", version));
        }
        if let Some(ref zmq) = c.zmq_root {
            cmd = cmd.arg(format!("-DZMQ_ROOT={}", zmq.display()));
        }
        if let Some(ref boost) = c.boost_root {
            cmd = cmd
                .arg(format!("-DBoost_DIR={}", boost.display()))
                .arg(format!("-DBoost_INCLUDE_DIR={}", boost.join("include").display()))
                .arg(format!("-DBoost_LIBRARY_DIRS={}", boost.join("lib").display()));
        }

        cmd = cmd
            .arg(format!(
                "-DQT_ROOT={}",
                qt_root(&c.sdk_dir, self.platform).display()
            ))
            .arg(format!("-DLIBS_ROOT={}", c.libs_dir.display()));

        for flag in self.platform.extra_cmake_flags(self.host) {
            cmd = cmd.arg(flag);
        }

        cmd = cmd.arg(c.source_dir.display().to_string());
        cmd = cmd.envs(self.tool_env()?);

        Ok(cmd)
    }

    /// Construct the ninja invocation.
    pub fn build_command(&self) -> Result<ExternalCommand> {
        let c = self.config;

        let cmd = ExternalCommand::new(self.platform.ninja_program(&c.source_dir))
            .cwd(&c.build_dir)
            .arg(format!("-j{}", c.jobs))
            .arg("install")
            .envs(self.tool_env()?);

        Ok(cmd)
    }

    /// Path the packaged artifact would land at, or `None` on platforms
    /// whose packaging stage is a no-op.
    pub fn artifact_path(&self) -> Option<PathBuf> {
        if !self.platform.packages_artifact() {
            return None;
        }
        let release = self.config.release_dir.as_ref()?;
        let subdir = release.join(self.platform.name()).join(&self.host.arch);
        Some(subdir.join(self.config.artifact_name(self.platform.name(), &self.host.arch)))
    }

    /// Run the whole pipeline: prepare directories, configure, build,
    /// package. Any tool failure aborts immediately.
    pub fn run(&self, executor: &mut dyn Executor) -> Result<Option<PathBuf>> {
        self.prepare_build_dir(executor.is_dry_run())?;
        self.print_info();

        if self.config.export_only {
            tracing::info!("export-only requested, skipping compile");
            return Ok(None);
        }

        self.configure(executor)?;
        self.build(executor)?;

        if self.config.package {
            return self.package(executor.is_dry_run());
        }
        Ok(None)
    }

    /// Clean (when requested) and create the build directory. Dry runs
    /// leave the filesystem alone.
    fn prepare_build_dir(&self, dry_run: bool) -> Result<()> {
        if dry_run {
            return Ok(());
        }
        if self.config.clean {
            remove_dir_all_if_exists(&self.config.build_dir)?;
        }
        ensure_dir(&self.config.build_dir)
    }

    fn configure(&self, executor: &mut dyn Executor) -> Result<()> {
        let cmd = self.configure_command()?;
        tracing::info!("configuring {}", self.config.project);

        let code = executor.run(&cmd)?;
        if code != Some(0) {
            return Err(Error::ConfigureFailed { code });
        }
        Ok(())
    }

    fn build(&self, executor: &mut dyn Executor) -> Result<()> {
        let cmd = self.build_command()?;
        tracing::info!("building {}", self.config.project);

        let code = executor.run(&cmd)?;
        if code != Some(0) {
            return Err(Error::BuildFailed { code });
        }
        Ok(())
    }

    /// Emit the CI parameter line pointing at the produced artifact.
    fn package(&self, dry_run: bool) -> Result<Option<PathBuf>> {
        let Some(artifact) = self.artifact_path() else {
            tracing::info!("packaging is a no-op on {}", self.platform.name());
            return Ok(None);
        };

        if !dry_run {
            if let Some(parent) = artifact.parent() {
                ensure_dir(parent)?;
            }
        }

        println!(
            "##teamcity[setParameter name='{}.artifact.path' value='{}']",
            self.config.project,
            artifact.display()
        );

        Ok(Some(artifact))
    }
}
