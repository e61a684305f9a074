//! esbuild CLI backend.

use super::{BuildResult, Esbuild, command_args, parse_diagnostics};
use crate::bundler::{BuildOptions, Error, LogLevel, Result};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::Command;

/// Runs builds by spawning the esbuild executable.
///
/// Each build is one `esbuild` process started in the project directory, so
/// relative entry points and output paths resolve against it. Diagnostics
/// are captured from stderr and parsed into the [`BuildResult`]. When the
/// options ask for more than `warning` verbosity, the rest of esbuild's
/// stderr is passed through to ours.
#[derive(Debug, Clone)]
pub struct EsbuildProcess {
    binary: PathBuf,
    working_dir: PathBuf,
}

impl EsbuildProcess {
    /// # Arguments
    ///
    /// * `binary` - Path to the esbuild executable (see [`super::locate_esbuild`])
    /// * `working_dir` - Directory esbuild runs in, usually the project root
    pub fn new(binary: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.binary.display(), args.join(" "))
    }
}

impl Esbuild for EsbuildProcess {
    async fn build(&self, options: BuildOptions) -> Result<BuildResult> {
        let args = command_args(&options);
        log::debug!("Running: {}", self.describe(&args));

        let output = Command::new(&self.binary)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|error| Error::Spawn {
                command: self.describe(&args),
                error,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            log::debug!("esbuild: {}", line);
        }

        let diagnostics = parse_diagnostics(&stderr);
        if options.log_level < LogLevel::Warning {
            forward(&diagnostics.other);
        }

        if !output.status.success() {
            return Err(Error::BuildFailed {
                outfile: options.outfile,
                code: output.status.code(),
                errors: diagnostics.errors,
                stderr,
            });
        }

        if !diagnostics.errors.is_empty() {
            log::warn!(
                "esbuild exited successfully but reported {} error(s) for {}",
                diagnostics.errors.len(),
                options.outfile.display()
            );
        }

        Ok(BuildResult {
            warnings: diagnostics.warnings,
            errors: Vec::new(),
        })
    }
}

fn forward(lines: &[String]) {
    let mut stderr = io::stderr().lock();
    for line in lines {
        if let Err(e) = writeln!(stderr, "{line}") {
            log::debug!("Failed to forward esbuild output: {}", e);
            return;
        }
    }
}
