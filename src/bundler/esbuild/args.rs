//! Translation of [`BuildOptions`] into esbuild CLI arguments.

use crate::bundler::{BuildOptions, LogLevel, Sourcemap};
use serde_json::Value;

/// Options whose list values are passed as one `--flag:item` per entry
/// rather than a comma separated `--flag=a,b`.
const REPEATED_OPTIONS: [&str; 4] = ["external", "inject", "drop", "pure"];

/// Options esbuild takes as a single JSON document, e.g. `--tsconfig-raw={...}`.
const JSON_OPTIONS: [&str; 1] = ["tsconfigRaw"];

/// Builds the esbuild argument list for `options`.
///
/// esbuild is always asked for at least `warning` verbosity, without colors
/// and without a message limit, so every warning can be recovered from its
/// stderr. A more verbose requested `logLevel` is passed through.
pub fn command_args(options: &BuildOptions) -> Vec<String> {
    let mut args: Vec<String> = options.entry_points.clone();

    args.push(format!("--outfile={}", options.outfile.display()));

    if options.bundle {
        args.push("--bundle".to_string());
    }

    args.push(format!("--platform={}", options.platform));

    if let Some(name) = &options.global_name {
        args.push(format!("--global-name={name}"));
    }

    if options.minify {
        args.push("--minify".to_string());
    }

    match options.sourcemap {
        Sourcemap::Enabled(true) => args.push("--sourcemap".to_string()),
        Sourcemap::Enabled(false) => {}
        Sourcemap::Mode(mode) => args.push(format!("--sourcemap={}", mode.as_str())),
    }

    if let Some(target) = &options.target {
        args.push(format!("--target={}", target.join(",")));
    }

    args.push(format!(
        "--log-level={}",
        options.log_level.min(LogLevel::Warning)
    ));
    args.push("--log-limit=0".to_string());
    args.push("--color=false".to_string());

    for (key, value) in &options.extra {
        push_extra(&mut args, &kebab_case(key), key, value);
    }

    args
}

fn push_extra(args: &mut Vec<String>, flag: &str, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(true) => args.push(format!("--{flag}")),
        Value::Bool(false) => args.push(format!("--{flag}=false")),
        Value::Number(n) => args.push(format!("--{flag}={n}")),
        Value::String(s) => args.push(format!("--{flag}={s}")),
        Value::Array(items) if REPEATED_OPTIONS.contains(&key) => {
            for item in items {
                args.push(format!("--{flag}:{}", scalar(item)));
            }
        }
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().map(scalar).collect();
            args.push(format!("--{flag}={}", joined.join(",")));
        }
        Value::Object(_) if JSON_OPTIONS.contains(&key) => args.push(format!("--{flag}={value}")),
        Value::Object(entries) => {
            for (name, entry) in entries {
                args.push(format!("--{flag}:{name}={}", scalar(entry)));
            }
        }
    }
}

/// Renders a JSON value the way esbuild expects it on the command line:
/// strings unquoted, everything else as JSON.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `keepNames` becomes `keep-names`.
fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
