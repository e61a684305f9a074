//! esbuild options for a single build task.
//!
//! Options are assembled in two layers:
//!
//! 1. **Computed**: derived from the [`BundleConfig`] fields and the task's
//!    output path ([`BuildOptions::from_config`]).
//! 2. **Overrides**: the config's raw `esbuild` mapping, applied last by
//!    [`BuildOptions::with_overrides`]. Each key replaces the computed value
//!    of the same name wholesale; there is no deep merging of nested values.
//!
//! Keys are esbuild's own camelCase option names. Keys this crate does not
//! model (e.g. `format`, `define`, `external`) are kept in
//! [`BuildOptions::extra`] and forwarded to esbuild untouched.

use crate::bundler::{
    BundleConfig, Error, Platform, Result, Sourcemap,
    utils::serde_ext::{entry_points, optional_one_or_many},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, path::PathBuf};

/// esbuild log verbosity, from most to least verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    #[default]
    Error,
    Silent,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully merged options for one esbuild invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Entry points in esbuild CLI form: `path` or `out=path`.
    #[serde(deserialize_with = "entry_points")]
    pub entry_points: Vec<String>,

    pub outfile: PathBuf,

    pub bundle: bool,

    pub platform: Platform,

    /// Omitted entirely when the config's `globalName` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,

    #[serde(default)]
    pub minify: bool,

    #[serde(default)]
    pub sourcemap: Sourcemap,

    /// Omitted entirely when the config's `target` is empty.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_one_or_many"
    )]
    pub target: Option<Vec<String>>,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Override keys without a dedicated field, in esbuild's naming.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuildOptions {
    /// Computes the options for one output of `config`.
    ///
    /// Log verbosity is fixed to `error`; the override layer is not applied.
    pub fn from_config(config: &BundleConfig, outfile: PathBuf) -> Self {
        Self {
            entry_points: vec![config.source.to_string_lossy().into_owned()],
            outfile,
            bundle: true,
            platform: config.platform,
            global_name: Some(config.global_name.clone()).filter(|name| !name.is_empty()),
            minify: config.minify,
            sourcemap: config.sourcemap,
            target: Some(config.target.clone()).filter(|target| !target.is_empty()),
            log_level: LogLevel::Error,
            extra: Map::new(),
        }
    }

    /// Applies the override layer: every key in `overrides` replaces the
    /// computed value of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when an override has a shape esbuild
    /// would reject for that key, e.g. `"bundle": "yes"`.
    pub fn with_overrides(self, overrides: &Map<String, Value>) -> Result<Self> {
        if overrides.is_empty() {
            return Ok(self);
        }

        let outfile = self.outfile.clone();
        let invalid = |error: serde_json::Error| Error::InvalidOptions {
            outfile: outfile.clone(),
            error,
        };

        let mut merged = match serde_json::to_value(&self).map_err(&invalid)? {
            Value::Object(map) => map,
            other => crate::bail!("build options serialized to non-object: {other}"),
        };

        for (key, value) in overrides {
            log::debug!("esbuild override for {}: {key} = {value}", outfile.display());
            merged.insert(key.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(merged)).map_err(invalid)
    }

    /// Computed options with the config's overrides applied.
    pub fn resolve(config: &BundleConfig, outfile: PathBuf) -> Result<Self> {
        Self::from_config(config, outfile).with_overrides(&config.esbuild)
    }
}
