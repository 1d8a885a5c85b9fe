//! Violation accumulation, bucketed by severity.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::report::Report;
use crate::types::{relative_display, Severity, Violation, ViolationCode};

/// Aggregate counters for one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of source files collected for the run.
    pub files_scanned: usize,
    /// Number of violations across all three buckets.
    pub total_violations: usize,
}

/// Accumulates violations for a single run.
///
/// One store per run; it owns the analysis root so that every recorded
/// path can be made relative to it.
#[derive(Debug)]
pub struct ViolationStore {
    root: PathBuf,
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
    info: Vec<Violation>,
    stats: Stats,
}

impl ViolationStore {
    /// Creates an empty store for the given analysis root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// The analysis root paths are made relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Records the number of files the run collected.
    pub fn set_files_scanned(&mut self, count: usize) {
        self.stats.files_scanned = count;
    }

    /// Appends a violation to its severity bucket.
    ///
    /// No deduplication: recording the same finding twice stores it twice.
    pub fn add_violation(
        &mut self,
        severity: Severity,
        file: &Path,
        line: Option<usize>,
        code: ViolationCode,
        message: impl Into<String>,
    ) {
        let violation = Violation::new(
            severity,
            relative_display(file, &self.root),
            line,
            code,
            message,
        );
        tracing::debug!("{severity}: {violation}");
        match severity {
            Severity::Error => self.errors.push(violation),
            Severity::Warning => self.warnings.push(violation),
            Severity::Info => self.info.push(violation),
        }
        self.stats.total_violations += 1;
    }

    /// Records a violation at the code's own severity.
    pub fn record(
        &mut self,
        file: &Path,
        line: Option<usize>,
        code: ViolationCode,
        message: impl Into<String>,
    ) {
        self.add_violation(code.severity(), file, line, code, message);
    }

    /// Error-severity violations recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Warning-severity violations recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    /// Info-severity violations recorded so far.
    #[must_use]
    pub fn info(&self) -> &[Violation] {
        &self.info
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Consumes the store into a finished report.
    #[must_use]
    pub fn into_report(self) -> Report {
        Report {
            errors: self.errors,
            warnings: self.warnings,
            info: self.info,
            stats: self.stats,
        }
    }
}
