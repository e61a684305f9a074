//! Bundle configuration as declared by the user.

use crate::bundler::utils::serde_ext::one_or_many;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, path::PathBuf};

/// Target platform handed to esbuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Browser,
    Node,
    Neutral,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Browser => "browser",
            Platform::Node => "node",
            Platform::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named source map modes supported by esbuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcemapMode {
    Linked,
    External,
    Inline,
    Both,
}

impl SourcemapMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SourcemapMode::Linked => "linked",
            SourcemapMode::External => "external",
            SourcemapMode::Inline => "inline",
            SourcemapMode::Both => "both",
        }
    }
}

/// Source map setting: either a plain on/off flag or a named mode.
///
/// ```json
/// { "sourcemap": true }
/// { "sourcemap": "inline" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sourcemap {
    Enabled(bool),
    Mode(SourcemapMode),
}

impl Default for Sourcemap {
    fn default() -> Self {
        Sourcemap::Enabled(false)
    }
}

/// Default output directory for bundles that do not declare one.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// One user-declared bundle: a single source file built into one output file
/// per declared type variant.
///
/// # Configuration
///
/// ```json
/// {
///   "name": "my-lib",
///   "source": "src/index.js",
///   "outputDir": "dist",
///   "platform": "browser",
///   "globalName": "MyLib",
///   "minify": true,
///   "sourcemap": true,
///   "target": ["es2018"],
///   "types": ["iife", "esm"],
///   "esbuild": { "format": "iife" }
/// }
/// ```
///
/// Keys in `esbuild` are passed straight to esbuild and win over every
/// option computed from the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Output file stem, e.g. `my-lib` produces `my-lib.js`.
    #[serde(default)]
    pub name: String,

    /// Entry point passed to esbuild.
    #[serde(default)]
    pub source: PathBuf,

    /// Directory the bundle is written to.
    ///
    /// Default: `dist`
    #[serde(default = "default_output_dir", alias = "output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub platform: Platform,

    /// Name of the global variable for IIFE bundles. Empty means unset.
    #[serde(default, alias = "global_name")]
    pub global_name: String,

    #[serde(default)]
    pub minify: bool,

    #[serde(default)]
    pub sourcemap: Sourcemap,

    /// esbuild compatibility targets. Empty means esbuild's default.
    #[serde(default, deserialize_with = "one_or_many")]
    pub target: Vec<String>,

    /// Output variants. The first entry writes `<name>.<ext>`, every later
    /// entry writes `<name>.<type>.<ext>`.
    #[serde(default)]
    pub types: Option<Vec<String>>,

    /// Raw esbuild options applied last.
    #[serde(default)]
    pub esbuild: Map<String, Value>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            source: PathBuf::new(),
            output_dir: default_output_dir(),
            platform: Platform::default(),
            global_name: String::new(),
            minify: false,
            sourcemap: Sourcemap::default(),
            target: Vec::new(),
            types: None,
            esbuild: Map::new(),
        }
    }
}

impl BundleConfig {
    /// Declared type variants, or an empty slice when there are none.
    pub fn types(&self) -> &[String] {
        self.types.as_deref().unwrap_or_default()
    }

    /// Output extension: `css` for stylesheet entry points, `js` otherwise.
    pub fn output_extension(&self) -> &'static str {
        if self.source.to_string_lossy().ends_with(".css") {
            "css"
        } else {
            "js"
        }
    }

    /// Output path for this bundle with the given file name suffix
    /// (`""` or `.<type>`).
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.{}",
            self.name,
            suffix,
            self.output_extension()
        ))
    }

    /// Checks the fields every bundle needs.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!(
                "bundle for source '{}' has no name",
                self.source.display()
            ));
        }

        if self.source.as_os_str().is_empty() {
            return Err(format!("bundle '{}' has no source", self.name));
        }

        if let Some(kind) = self.types().iter().find(|t| t.trim().is_empty()) {
            return Err(format!(
                "bundle '{}' declares an empty type variant ({kind:?})",
                self.name
            ));
        }

        Ok(())
    }
}
