//! The external bundler seam.
//!
//! The orchestrator never bundles anything itself: each task is handed to an
//! [`Esbuild`] backend as a fully merged [`BuildOptions`]. The default backend,
//! [`EsbuildProcess`], runs the esbuild CLI; tests substitute in-memory fakes.

mod args;
mod message;
mod process;
mod tool_detection;

pub use args::command_args;
pub use message::{BuildResult, Diagnostics, Location, Message, parse_diagnostics};
pub use process::EsbuildProcess;
pub use tool_detection::{ESBUILD_BINARY_PATH_ENV, locate_esbuild};

use crate::bundler::{BuildOptions, Result};
use std::future::Future;

/// An esbuild-compatible build function.
///
/// Implementations resolve with the build's [`BuildResult`] (which may carry
/// warnings) or fail with the error that should abort the whole build pass.
pub trait Esbuild {
    fn build(&self, options: BuildOptions) -> impl Future<Output = Result<BuildResult>> + Send;
}

impl<T: Esbuild> Esbuild for &T {
    fn build(&self, options: BuildOptions) -> impl Future<Output = Result<BuildResult>> + Send {
        (**self).build(options)
    }
}
