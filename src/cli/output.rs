//! Terminal output for the command line tool.

use crate::bundler::{BuildState, Notifier, esbuild::BuildResult};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes progress, results and warnings to the terminal.
///
/// Progress and success messages go to stdout, warnings and errors to
/// stderr. Quiet mode keeps only warnings and errors; verbose mode adds
/// detail lines such as the list of written files.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Print a detail line, only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(io::stdout().lock(), "  {}", self.paint(message, Style::Dim))?;
        }
        Ok(())
    }

    /// Print a progress message.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout().lock(), "{}", self.paint(message, Style::Progress))?;
        }
        Ok(())
    }

    /// Print a success message.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                self.paint("✓", Style::Success),
                message
            )?;
        }
        Ok(())
    }

    /// Print a warning, even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{} {}",
            self.paint("▲ warning:", Style::Warning),
            message
        )
    }

    /// Print an error, even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{} {}",
            self.paint("✘ error:", Style::Error),
            message
        )
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if !self.color {
            return text.to_string();
        }
        match style {
            Style::Dim => text.dimmed().to_string(),
            Style::Progress => text.cyan().to_string(),
            Style::Success => text.green().bold().to_string(),
            Style::Warning => text.yellow().bold().to_string(),
            Style::Error => text.red().bold().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Dim,
    Progress,
    Success,
    Warning,
    Error,
}

/// Terminal writes are best effort; a closed pipe must not fail the build.
fn report(result: io::Result<()>) {
    if let Err(e) = result {
        log::debug!("Failed to write build output: {}", e);
    }
}

/// Summary line for a finished pass, e.g. `Built 3 files in 41ms at 14:02:17`.
pub fn build_summary(state: &BuildState) -> String {
    let count = state.files().len();
    let mut summary = format!(
        "Built {} file{} in {}ms",
        count,
        if count == 1 { "" } else { "s" },
        state.build_time().as_millis()
    );
    if let Some(at) = state.last_built() {
        summary.push_str(&format!(" at {}", at.format("%H:%M:%S")));
    }
    summary
}

impl Notifier for OutputManager {
    fn building(&self) {
        report(self.progress("Building..."));
    }

    fn built(&self, state: &BuildState) {
        report(self.success(&build_summary(state)));
        for file in state.files() {
            report(self.verbose(&file.display().to_string()));
        }
    }

    fn warnings(&self, results: &[BuildResult]) {
        for warning in results.iter().flat_map(|result| &result.warnings) {
            report(self.warn(&warning.to_string()));
            if let Some(location) = &warning.location
                && !location.line_text.is_empty()
            {
                report(self.verbose(location.line_text.trim_end()));
            }
        }
    }
}
