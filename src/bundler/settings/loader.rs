//! Loading bundle configs from the project directory.
//!
//! Three file shapes are understood, looked up in this order:
//!
//! - `esbundle.json`: an array of bundles, or `{ "bundles": [...] }`
//! - `esbundle.toml`: `[[bundles]]` tables
//! - `package.json`: the `esbundle` key, holding either of the JSON shapes
//!
//! Bundles declared in `package.json` default their `name` to the package
//! name without its npm scope.

use super::BundleConfig;
use crate::bundler::{Error, Result, error::ErrorExt};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file names searched by [`discover_config`], in priority order.
pub const CONFIG_FILES: [&str; 3] = ["esbundle.json", "esbundle.toml", "package.json"];

/// Key holding the bundle list inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "esbundle";

#[derive(Deserialize)]
#[serde(untagged)]
enum BundleList {
    List(Vec<BundleConfig>),
    Table { bundles: Vec<BundleConfig> },
}

impl From<BundleList> for Vec<BundleConfig> {
    fn from(list: BundleList) -> Self {
        match list {
            BundleList::List(bundles) | BundleList::Table { bundles } => bundles,
        }
    }
}

/// Finds the config file for a project directory.
///
/// `package.json` only counts when it carries an `esbundle` key, so a plain
/// npm project without bundles is reported as unconfigured.
pub fn discover_config(dir: &Path) -> Result<PathBuf> {
    for file_name in CONFIG_FILES {
        let candidate = dir.join(file_name);
        if !candidate.is_file() {
            log::debug!("Config candidate not found: {}", candidate.display());
            continue;
        }

        if file_name == "package.json" && !package_json_has_bundles(&candidate)? {
            log::debug!(
                "{} has no '{}' key, skipping",
                candidate.display(),
                PACKAGE_JSON_KEY
            );
            continue;
        }

        log::debug!("Using bundle config: {}", candidate.display());
        return Ok(candidate);
    }

    Err(Error::ConfigNotFound {
        dir: dir.to_path_buf(),
    })
}

/// Loads and validates the bundle list from a config file.
///
/// The format is chosen from the file name: `package.json`, any other
/// `*.json`, or `*.toml`.
pub fn load_config(path: &Path) -> Result<Vec<BundleConfig>> {
    let contents = std::fs::read_to_string(path).fs_context("reading bundle config", path)?;

    let is_package_json = path.file_name().is_some_and(|name| name == "package.json");
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let bundles = if is_package_json {
        parse_package_json(&contents).map_err(|reason| config_error(path, reason))?
    } else {
        match extension {
            "json" => serde_json::from_str::<BundleList>(&contents)
                .map(Vec::from)
                .map_err(|e| config_error(path, e.to_string()))?,
            "toml" => toml::from_str::<BundleList>(&contents)
                .map(Vec::from)
                .map_err(|e| config_error(path, e.to_string()))?,
            other => {
                return Err(config_error(
                    path,
                    format!("unsupported config format '{other}', expected .json or .toml"),
                ));
            }
        }
    };

    if bundles.is_empty() {
        return Err(config_error(path, "no bundles declared".to_string()));
    }

    for bundle in &bundles {
        bundle.validate().map_err(|reason| config_error(path, reason))?;
    }

    log::info!("Loaded {} bundle(s) from {}", bundles.len(), path.display());
    Ok(bundles)
}

fn parse_package_json(contents: &str) -> std::result::Result<Vec<BundleConfig>, String> {
    let manifest: serde_json::Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;

    let section = manifest
        .get(PACKAGE_JSON_KEY)
        .cloned()
        .ok_or_else(|| format!("no '{PACKAGE_JSON_KEY}' key"))?;

    let mut bundles: Vec<BundleConfig> = serde_json::from_value::<BundleList>(section)
        .map(Vec::from)
        .map_err(|e| e.to_string())?;

    if let Some(package_name) = manifest.get("name").and_then(|v| v.as_str()) {
        let default_name = unscoped(package_name);
        for bundle in bundles.iter_mut().filter(|b| b.name.is_empty()) {
            bundle.name = default_name.to_string();
        }
    }

    Ok(bundles)
}

fn package_json_has_bundles(path: &Path) -> Result<bool> {
    let contents = std::fs::read_to_string(path).fs_context("reading package.json", path)?;
    let manifest: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| config_error(path, e.to_string()))?;
    Ok(manifest.get(PACKAGE_JSON_KEY).is_some())
}

/// Strips an npm scope: `@acme/widget` becomes `widget`.
fn unscoped(package_name: &str) -> &str {
    match package_name.strip_prefix('@') {
        Some(scoped) => scoped.split_once('/').map_or(scoped, |(_, name)| name),
        None => package_name,
    }
}

fn config_error(path: &Path, reason: String) -> Error {
    Error::Config {
        path: path.to_path_buf(),
        reason,
    }
}
