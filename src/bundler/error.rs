//! Error types for bundling operations.

use super::esbuild::Message;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the bundler module.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading bundle configs or running esbuild.
#[derive(Error, Debug)]
pub enum Error {
    /// Plain I/O failure without extra context.
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// File system failure with the operation and path that caused it.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        context: &'static str,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A bundle config file could not be parsed or failed validation.
    #[error("invalid bundle config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// No config file was found in the project directory.
    #[error(
        "no bundle config found in {} (looked for esbundle.json, esbundle.toml, package.json#esbundle)",
        .dir.display()
    )]
    ConfigNotFound { dir: PathBuf },

    /// The esbuild binary could not be located.
    #[error(
        "esbuild binary not found. Install it with `npm install esbuild`, \
         pass --esbuild <PATH>, or set ESBUILD_BINARY_PATH"
    )]
    EsbuildNotFound,

    /// The esbuild process could not be started.
    #[error("failed to run {command}: {error}")]
    Spawn {
        command: String,
        #[source]
        error: std::io::Error,
    },

    /// esbuild ran and reported a failed build.
    #[error(
        "esbuild failed to build {path}{exit}: {summary}",
        path = .outfile.display(),
        exit = .code.map(|c| format!(" (exit code {c})")).unwrap_or_default(),
        summary = summarize_failure(.errors, .stderr)
    )]
    BuildFailed {
        outfile: PathBuf,
        code: Option<i32>,
        errors: Vec<Message>,
        stderr: String,
    },

    /// The override mapping produced options esbuild cannot accept.
    #[error("invalid esbuild options for {}: {error}", .outfile.display())]
    InvalidOptions {
        outfile: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    #[error("{0}")]
    GenericError(String),
}

fn summarize_failure(errors: &[Message], stderr: &str) -> String {
    match errors {
        [] => {
            let stderr = stderr.trim();
            if stderr.is_empty() {
                "no diagnostics reported".to_string()
            } else {
                stderr.to_string()
            }
        }
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more errors)", rest.len()),
    }
}

/// Returns early with an [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

/// Attaches file system context to I/O results.
pub trait ErrorExt<T> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}
