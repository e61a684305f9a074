//! Command line interface for esbundle.
//!
//! Loads the project's bundle list, locates esbuild and runs one build pass,
//! reporting progress through [`OutputManager`].

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::{OutputManager, build_summary};

use crate::bundler::{
    BuildState, Bundler, discover_config,
    esbuild::{EsbuildProcess, locate_esbuild},
    load_config,
};
use crate::error::{CliError, Result};
use anyhow::Context;
use path_absolutize::Absolutize;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(&args);
    let output = runtime.output();

    let cwd = args
        .cwd
        .absolutize()
        .with_context(|| format!("Failed to resolve project directory {}", args.cwd.display()))?
        .into_owned();

    let config_path = match &args.config {
        Some(path) => cwd.join(path),
        None => discover_config(&cwd)?,
    };
    log::info!("Loading bundles from {}", config_path.display());
    let bundles = load_config(&config_path)?;
    output.verbose(&format!(
        "{} bundle(s) from {}",
        bundles.len(),
        config_path.display()
    ))?;

    let binary = locate_esbuild(&cwd, args.esbuild.as_deref()).await?;
    let process = EsbuildProcess::new(binary, &cwd);
    output.verbose(&format!("Using esbuild at {}", process.binary().display()))?;

    let mut state = BuildState::new(bundles);
    let bundler = Bundler::new(process, output);

    if let Err(e) = bundler.run_build(&mut state).await {
        output.error(&e.to_string())?;
        return Ok(1);
    }

    Ok(0)
}
