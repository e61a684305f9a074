//! Fan-out bundling on top of esbuild
//!
//! A project declares a list of bundles. Every build pass runs esbuild once
//! per bundle and declared type variant, all concurrently, and succeeds only
//! if every invocation does.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
