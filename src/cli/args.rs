//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with validation and the runtime configuration derived from it.

use clap::Parser;
use std::path::PathBuf;

/// Build every bundle declared in the project's esbundle config
#[derive(Parser, Debug)]
#[command(
    name = "esbundle",
    version,
    about = "Build every bundle declared in the project's esbundle config",
    long_about = "Runs esbuild once per declared bundle and type variant, all in parallel.

Bundles are read from esbundle.json, esbundle.toml, or the \"esbundle\" key of
package.json in the project directory (first match wins).

Usage:
  esbundle
  esbundle --config config/bundles.toml
  esbundle --cwd packages/widget --esbuild /usr/local/bin/esbuild

Exit code 0 = every bundle was written."
)]
pub struct Args {
    /// Config file to load instead of searching the project directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// esbuild executable to run
    #[arg(long, value_name = "PATH", env = "ESBUILD_BINARY_PATH")]
    pub esbuild: Option<PathBuf>,

    /// Project directory; esbuild runs here and relative paths resolve against it
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub cwd: PathBuf,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also list every written file
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output (also disabled when NO_COLOR is set)
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.cwd.is_dir() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.cwd.display()
            ));
        }

        if let Some(config) = &self.config {
            let config = self.cwd.join(config);
            if !config.is_file() {
                return Err(format!("Config file not found: {}", config.display()));
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
        let output = super::OutputManager::new(args.verbose, args.quiet).with_color(color);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
