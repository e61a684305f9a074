//! Diagnostics reported by esbuild and the per-build result.
//!
//! The esbuild CLI prints diagnostics to stderr in a stable, human-oriented
//! layout when colors are disabled:
//!
//! ```text
//! ▲ [WARNING] Comparison with -0 using the "===" operator will also match 0 [equals-negative-zero]
//!
//!     src/index.js:1:4:
//!       1 │ if (x === -0) {}
//!         ╵     ~~
//! ```
//!
//! [`parse_diagnostics`] turns that output back into [`Message`] values.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

/// Source location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// The offending source line, when esbuild printed it.
    pub line_text: String,
}

/// A single warning or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// esbuild's message id, e.g. `equals-negative-zero`.
    pub id: Option<String>,
    pub text: String,
    pub location: Option<Location>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            location: None,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{}:{}:{}: ", loc.file, loc.line, loc.column)?;
        }
        f.write_str(&self.text)?;
        if let Some(id) = &self.id {
            write!(f, " [{id}]")?;
        }
        Ok(())
    }
}

/// Result of one esbuild invocation.
///
/// A successful build always has an empty `errors` list; failed builds
/// surface as [`crate::bundler::Error::BuildFailed`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    pub warnings: Vec<Message>,
    pub errors: Vec<Message>,
}

impl BuildResult {
    pub fn with_warnings(warnings: Vec<Message>) -> Self {
        Self {
            warnings,
            errors: Vec::new(),
        }
    }
}

/// Warnings and errors recovered from esbuild's stderr.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub warnings: Vec<Message>,
    pub errors: Vec<Message>,
    /// Non-empty stderr lines outside any diagnostic, such as the output
    /// file summary esbuild prints at `info` level.
    pub other: Vec<String>,
}

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[▲✘X]\s+)?\[(WARNING|ERROR)\]\s+(.*?)(?:\s+\[([A-Za-z0-9-]+)\])?\s*$")
        .expect("diagnostic header pattern is valid")
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+(\S.*?):(\d+):(\d+):\s*$").expect("diagnostic location pattern is valid")
});

static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+ (?:warnings?|errors?)(?: and \d+ (?:warnings?|errors?))?(?: \(.*\))?$")
        .expect("diagnostic summary pattern is valid")
});

static SOURCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+\d+\s+│\s?(.*)$").expect("diagnostic source pattern is valid")
});

#[derive(Clone, Copy)]
enum Severity {
    Warning,
    Error,
}

/// Parses esbuild's stderr into warnings and errors.
///
/// A diagnostic runs from its `[WARNING]`/`[ERROR]` header up to the next
/// unindented line. Within it only the first location and its source line
/// are kept; notes and underline markers are dropped. Summaries such as
/// `1 warning` are dropped too, and every other non-empty line lands in
/// [`Diagnostics::other`].
pub fn parse_diagnostics(stderr: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();
    let mut current: Option<(Severity, Message)> = None;
    let mut expect_source = false;

    for line in stderr.lines() {
        if let Some(caps) = HEADER.captures(line) {
            push(&mut diagnostics, current.take());
            expect_source = false;

            let severity = match &caps[1] {
                "ERROR" => Severity::Error,
                _ => Severity::Warning,
            };
            current = Some((
                severity,
                Message {
                    id: caps.get(3).map(|m| m.as_str().to_string()),
                    text: caps[2].to_string(),
                    location: None,
                },
            ));
            continue;
        }

        let in_block = line.is_empty() || line.starts_with(char::is_whitespace);
        match current.as_mut() {
            Some((_, message)) if in_block => {
                if message.location.is_none() {
                    if let Some(caps) = LOCATION.captures(line) {
                        message.location = Some(Location {
                            file: caps[1].to_string(),
                            line: caps[2].parse().unwrap_or_default(),
                            column: caps[3].parse().unwrap_or_default(),
                            line_text: String::new(),
                        });
                        expect_source = true;
                    }
                } else if expect_source {
                    if let Some(caps) = SOURCE_LINE.captures(line) {
                        if let Some(loc) = message.location.as_mut() {
                            loc.line_text = caps[1].to_string();
                        }
                        expect_source = false;
                    }
                }
            }
            _ => {
                push(&mut diagnostics, current.take());
                expect_source = false;
                if !line.trim().is_empty() && !SUMMARY.is_match(line) {
                    diagnostics.other.push(line.to_string());
                }
            }
        }
    }

    push(&mut diagnostics, current);
    diagnostics
}

fn push(diagnostics: &mut Diagnostics, message: Option<(Severity, Message)>) {
    match message {
        Some((Severity::Warning, message)) => diagnostics.warnings.push(message),
        Some((Severity::Error, message)) => diagnostics.errors.push(message),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STDERR: &str = r#"▲ [WARNING] Comparison with -0 using the "===" operator will also match 0 [equals-negative-zero]

    src/index.js:1:4:
      1 │ if (x === -0) {}
        ╵     ~~

  Floating-point equality is defined such that 0 and -0 are equal.

✘ [ERROR] Could not resolve "left-pad"

    src/util.js:3:20:
      3 │ import leftPad from "left-pad"
        ╵                     ~~~~~~~~~~

  You can mark the path "left-pad" as external to exclude it from the bundle.

1 warning and 1 error
"#;

    #[test]
    fn parses_warning_with_location_and_id() {
        let diagnostics = parse_diagnostics(STDERR);

        assert_eq!(diagnostics.warnings.len(), 1);
        let warning = &diagnostics.warnings[0];
        assert_eq!(warning.id.as_deref(), Some("equals-negative-zero"));
        assert_eq!(
            warning.text,
            r#"Comparison with -0 using the "===" operator will also match 0"#
        );
        assert_eq!(
            warning.location,
            Some(Location {
                file: "src/index.js".into(),
                line: 1,
                column: 4,
                line_text: "if (x === -0) {}".into(),
            })
        );
    }

    #[test]
    fn parses_error_without_id() {
        let diagnostics = parse_diagnostics(STDERR);

        assert_eq!(diagnostics.errors.len(), 1);
        let error = &diagnostics.errors[0];
        assert_eq!(error.id, None);
        assert_eq!(error.text, r#"Could not resolve "left-pad""#);
        assert_eq!(
            error.to_string(),
            r#"src/util.js:3:20: Could not resolve "left-pad""#
        );
    }

    #[test]
    fn ascii_markers_and_missing_location() {
        let diagnostics = parse_diagnostics("X [ERROR] Must use \"outdir\" when there are multiple input files\n");

        assert!(diagnostics.warnings.is_empty());
        assert_eq!(diagnostics.errors.len(), 1);
        assert_eq!(diagnostics.errors[0].location, None);
    }

    #[test]
    fn summary_is_not_other_output() {
        assert!(parse_diagnostics(STDERR).other.is_empty());
    }

    #[test]
    fn non_diagnostic_lines_are_kept_apart() {
        let stderr = "▲ [WARNING] Unsupported \"use strict\" [unsupported-directive]\n\n    src/a.js:1:0:\n      1 │ \"use strict\"\n\n1 warning\n\n  dist/app.js  1.2kb\n\n⚡ Done in 4ms\n";
        let diagnostics = parse_diagnostics(stderr);

        assert_eq!(diagnostics.warnings.len(), 1);
        assert_eq!(diagnostics.warnings[0].location.as_ref().unwrap().line_text, "\"use strict\"");
        assert_eq!(diagnostics.other, ["  dist/app.js  1.2kb", "⚡ Done in 4ms"]);
    }
}
