//! Builder for constructing bundle configs in code.

use super::{BundleConfig, Platform, Sourcemap};
use crate::bundler::Error;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Builder for constructing a [`BundleConfig`].
///
/// Library users that do not load a config file can describe bundles
/// fluently; the result is validated the same way loaded configs are.
///
/// # Examples
///
/// ```no_run
/// use esbundle::bundler::{BundleConfigBuilder, Platform};
///
/// # fn example() -> esbundle::bundler::Result<()> {
/// let config = BundleConfigBuilder::new("my-lib", "src/index.js")
///     .output_dir("dist")
///     .platform(Platform::Node)
///     .types(["cjs", "esm"])
///     .esbuild_option("format", "cjs")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct BundleConfigBuilder {
    config: BundleConfig,
}

impl BundleConfigBuilder {
    /// Starts a bundle with the two required fields.
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            config: BundleConfig {
                name: name.into(),
                source: source.into(),
                ..Default::default()
            },
        }
    }

    /// Sets the output directory.
    ///
    /// Default: `dist`
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.config.platform = platform;
        self
    }

    pub fn global_name(mut self, name: impl Into<String>) -> Self {
        self.config.global_name = name.into();
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.config.minify = minify;
        self
    }

    pub fn sourcemap(mut self, sourcemap: Sourcemap) -> Self {
        self.config.sourcemap = sourcemap;
        self
    }

    pub fn target<I, S>(mut self, target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.target = target.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the type variants. The first one keeps the plain output name.
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a raw esbuild option that overrides any computed option.
    pub fn esbuild_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.esbuild.insert(key.into(), value.into());
        self
    }

    /// Validates and returns the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenericError`] if `name` or `source` is empty, or a
    /// type variant is blank.
    pub fn build(self) -> crate::bundler::Result<BundleConfig> {
        self.config.validate().map_err(Error::GenericError)?;
        Ok(self.config)
    }
}
