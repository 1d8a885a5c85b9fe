//! Report rendering: human-readable text and structured JSON.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::store::Stats;
use crate::types::Violation;

/// Output format for the rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Grouped, human-readable text.
    #[default]
    Console,
    /// Pretty-printed JSON.
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" | "text" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{other}'")),
        }
    }
}

/// Options for text rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Include info-severity entries.
    pub detailed: bool,
    /// Wrap headers and the summary in ANSI colours.
    pub color: bool,
}

/// Finished result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Error-severity violations.
    pub errors: Vec<Violation>,
    /// Warning-severity violations.
    pub warnings: Vec<Violation>,
    /// Info-severity violations.
    pub info: Vec<Violation>,
    /// Aggregate counters.
    pub stats: Stats,
}

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

impl Report {
    /// The run fails if and only if there is at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All violations, errors first, then warnings, then info.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    /// Renders the grouped text report.
    #[must_use]
    pub fn render_text(&self, opts: TextOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Architecture analysis: {} file(s) scanned",
            self.stats.files_scanned
        );
        let _ = writeln!(out);

        let mut shown = 0;
        let mut section = |out: &mut String, title: &str, color: &str, items: &[Violation]| {
            if items.is_empty() {
                return;
            }
            let header = format!("{title} ({}):", items.len());
            let _ = writeln!(out, "{}", paint(&header, color, opts.color));
            for v in items {
                let _ = writeln!(out, "  {v}");
            }
            let _ = writeln!(out);
            shown += items.len();
        };

        section(&mut out, "Errors", RED, &self.errors);
        section(&mut out, "Warnings", YELLOW, &self.warnings);
        if opts.detailed {
            section(&mut out, "Info", BLUE, &self.info);
        }

        if shown == 0 {
            let _ = writeln!(out, "No architecture violations found.");
            let _ = writeln!(out);
        }
        if !opts.detailed && !self.info.is_empty() {
            let _ = writeln!(
                out,
                "{} info message(s) hidden, use --detailed to show them.",
                self.info.len()
            );
        }

        let summary = format!(
            "Summary: {} error(s), {} warning(s), {} info(s)",
            self.errors.len(),
            self.warnings.len(),
            self.info.len()
        );
        let summary_color = if self.has_errors() {
            RED
        } else if self.warnings.is_empty() {
            GREEN
        } else {
            YELLOW
        };
        let _ = writeln!(out, "{}", paint(&summary, summary_color, opts.color));
        out
    }

    /// Renders the structured report. Info entries are always included.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: ReportFormat, opts: TextOptions) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Console => Ok(self.render_text(opts)),
            ReportFormat::Json => self.render_json().map(|mut s| {
                s.push('\n');
                s
            }),
        }
    }
}
