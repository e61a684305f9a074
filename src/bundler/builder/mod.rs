//! Build orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that turns bundle
//! configs into esbuild invocations.
//!
//! # Overview
//!
//! A build pass:
//! 1. Expands every [`BundleConfig`](crate::bundler::BundleConfig) into one
//!    [`BuildTask`] per declared type (or a single task)
//! 2. Resolves each task's [`BuildOptions`], applying the config's raw
//!    esbuild overrides last
//! 3. Runs all tasks concurrently and joins them in task order
//! 4. Records the outputs on the [`BuildState`](crate::bundler::BuildState)
//!    and notifies
//!
//! # Module Organization
//!
//! - [`options`] - Two-layer esbuild option merge
//! - [`orchestrator`] - Main [`Bundler`] struct and the build pass
//! - [`task`] - Config to task expansion and output naming

mod options;
mod orchestrator;
mod task;

pub use options::{BuildOptions, LogLevel};
pub use orchestrator::Bundler;
pub use task::{BuildTask, duplicate_outputs, expand_tasks};
