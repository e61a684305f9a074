//! Fan-out builds on top of esbuild.
//!
//! A project declares a list of [`BundleConfig`]s. Each build pass expands
//! them into one esbuild invocation per declared type variant, runs all of
//! them concurrently, and records the outcome on a [`BuildState`].
//!
//! # Module Organization
//!
//! - [`builder`] - The [`Bundler`] orchestrator, task expansion and option merging
//! - [`esbuild`] - The [`Esbuild`](esbuild::Esbuild) seam and the esbuild CLI backend
//! - [`settings`] - Bundle configuration types and config file loading
//! - [`state`] - Per-project build statistics
//! - [`notify`] - Lifecycle notifications

pub mod builder;
pub(crate) mod error;
pub mod esbuild;
pub mod notify;
pub mod settings;
pub mod state;
pub(crate) mod utils;

pub use builder::{BuildOptions, BuildTask, Bundler, LogLevel, expand_tasks};
pub use error::{Error, ErrorExt, Result};
pub use notify::{Notifier, SilentNotifier};
pub use settings::{
    BundleConfig, BundleConfigBuilder, Platform, Sourcemap, SourcemapMode, discover_config,
    load_config,
};
pub use state::BuildState;
