//! Bundle configuration types and loading.
//!
//! A project declares an ordered list of [`BundleConfig`]s, usually in a
//! config file read by [`load_config`]. Library users can also assemble them
//! with [`BundleConfigBuilder`].

mod builder;
mod bundle;
mod loader;

pub use builder::BundleConfigBuilder;
pub use bundle::{BundleConfig, DEFAULT_OUTPUT_DIR, Platform, Sourcemap, SourcemapMode};
pub use loader::{CONFIG_FILES, PACKAGE_JSON_KEY, discover_config, load_config};
