//! Build state carried across build passes.

use super::BundleConfig;
use chrono::{DateTime, Local};
use std::{path::PathBuf, time::Duration};

/// Configuration plus the bookkeeping of completed build passes.
///
/// The orchestrator takes the state by `&mut`, so only one pass can run
/// against a given state at a time. A pass that fails leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct BuildState {
    config: Vec<BundleConfig>,
    build_time: Duration,
    build_count: u64,
    files: Vec<PathBuf>,
    last_built: Option<DateTime<Local>>,
}

impl BuildState {
    pub fn new(config: Vec<BundleConfig>) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The bundle configs built by each pass, in declaration order.
    pub fn config(&self) -> &[BundleConfig] {
        &self.config
    }

    /// Replaces the bundle configs used by the next pass.
    pub fn set_config(&mut self, config: Vec<BundleConfig>) {
        self.config = config;
    }

    /// Duration of the last successful pass.
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    /// Number of successful passes so far.
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    /// Output files written by the last successful pass, in task order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Wall-clock time the last successful pass finished.
    pub fn last_built(&self) -> Option<DateTime<Local>> {
        self.last_built
    }

    /// Clears the per-pass output file list.
    pub fn reset_build(&mut self) {
        self.files.clear();
    }

    pub(crate) fn add_file(&mut self, file: PathBuf) {
        self.files.push(file);
    }

    /// Records a finished pass.
    pub(crate) fn finish_build(&mut self, elapsed: Duration) {
        self.build_time = elapsed;
        self.build_count += 1;
        self.last_built = Some(Local::now());
    }
}
