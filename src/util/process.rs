//! External command model and execution.
//!
//! The driver constructs [`ExternalCommand`] values with pure functions;
//! the blocking invocation lives behind the [`Executor`] trait so that
//! dry-run mode (and tests) never spawn anything.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// A fully-described invocation of an external tool.
///
/// Environment overrides are explicit and travel with the command; the
/// process-wide environment is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl ExternalCommand {
    /// Create a new command for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ExternalCommand {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable override for this command only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set several environment overrides at once.
    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the environment overrides.
    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Display the command for logs and dry-run output.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }
}

/// Runs (or records) external commands.
pub trait Executor {
    /// Run the command to completion and return its exit code, or `None`
    /// if the process was terminated by a signal.
    fn run(&mut self, cmd: &ExternalCommand) -> Result<Option<i32>>;

    /// Whether this executor actually spawns processes.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Executor that spawns the real process, inheriting stdout/stderr, and
/// blocks until it exits.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn run(&mut self, cmd: &ExternalCommand) -> Result<Option<i32>> {
        tracing::debug!("running: {}", cmd.display_command());

        let status = cmd.build_command().status().map_err(|source| Error::Spawn {
            program: cmd.get_program().display().to_string(),
            source,
        })?;

        Ok(status.code())
    }
}

/// Executor for dry-run mode: prints each command verbatim and reports
/// success without spawning anything.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    commands: Vec<ExternalCommand>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        DryRunExecutor::default()
    }

    /// Commands recorded so far, in invocation order.
    pub fn commands(&self) -> &[ExternalCommand] {
        &self.commands
    }
}

impl Executor for DryRunExecutor {
    fn run(&mut self, cmd: &ExternalCommand) -> Result<Option<i32>> {
        println!("{}", cmd.display_command());
        self.commands.push(cmd.clone());
        Ok(Some(0))
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}

/// Find Ninja.
pub fn find_ninja() -> Option<PathBuf> {
    find_executable("ninja")
}
