//! Locating the esbuild binary.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Environment variable esbuild itself uses to point at a custom binary.
pub const ESBUILD_BINARY_PATH_ENV: &str = "ESBUILD_BINARY_PATH";

/// Finds the esbuild executable for a project and logs its version.
///
/// Lookup order:
/// 1. `explicit` (usually from `--esbuild`)
/// 2. the `ESBUILD_BINARY_PATH` environment variable
/// 3. `<project_dir>/node_modules/.bin/esbuild`
/// 4. `esbuild` on `PATH`
///
/// Explicit and environment paths are trusted as given; the other
/// candidates must exist. A failing `--version` probe is only logged.
pub async fn locate_esbuild(project_dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    let from_env = std::env::var_os(ESBUILD_BINARY_PATH_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    let path = find_esbuild(project_dir, explicit, from_env)?;
    log_version(&path).await;
    Ok(path)
}

fn find_esbuild(
    project_dir: &Path,
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        log::debug!("Using esbuild from explicit path: {}", path.display());
        return Ok(path.to_path_buf());
    }

    if let Some(path) = from_env {
        log::debug!(
            "Using esbuild from {}: {}",
            ESBUILD_BINARY_PATH_ENV,
            path.display()
        );
        return Ok(path);
    }

    let local = project_dir
        .join("node_modules")
        .join(".bin")
        .join(if cfg!(windows) { "esbuild.cmd" } else { "esbuild" });
    if local.is_file() {
        log::debug!("Found project-local esbuild at: {}", local.display());
        return Ok(local);
    }
    log::debug!("No project-local esbuild at {}", local.display());

    match which::which("esbuild") {
        Ok(path) => {
            log::debug!("Found esbuild on PATH at: {}", path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("esbuild not found in PATH: {}", e);
            Err(Error::EsbuildNotFound)
        }
    }
}

async fn log_version(path: &Path) {
    match Command::new(path).arg("--version").output().await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!("✓ esbuild available: {} ({})", version.trim(), path.display());
        }
        Ok(output) => {
            log::warn!(
                "esbuild at {} failed its --version check (exit code: {:?}). Stderr: {}",
                path.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Err(e) => {
            log::warn!(
                "esbuild at {} could not be executed: {}. Check the path and file permissions.",
                path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with_local_esbuild() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules").join(".bin");
        std::fs::create_dir_all(&bin).unwrap();
        let local = bin.join(if cfg!(windows) { "esbuild.cmd" } else { "esbuild" });
        std::fs::write(&local, "#!/bin/sh\necho 0.25.0\n").unwrap();
        (dir, local)
    }

    #[tokio::test]
    async fn explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("custom-esbuild");

        let found = locate_esbuild(dir.path(), Some(&explicit)).await.unwrap();
        assert_eq!(found, explicit);
    }

    #[test]
    fn environment_path_beats_project_local_binary() {
        let (dir, _) = project_with_local_esbuild();
        let from_env = PathBuf::from("/opt/esbuild/bin/esbuild");

        let found = find_esbuild(dir.path(), None, Some(from_env.clone())).unwrap();
        assert_eq!(found, from_env);
    }

    #[test]
    fn project_local_binary_is_preferred_over_path() {
        let (dir, local) = project_with_local_esbuild();

        let found = find_esbuild(dir.path(), None, None).unwrap();
        assert_eq!(found, local);
    }
}
