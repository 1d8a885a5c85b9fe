//! One-shot analysis pipeline.
//!
//! Collect files, parse each once into the cache, run every enabled rule
//! over the full cache, then render the report. Each call builds its own
//! cache and store; nothing is shared between runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use layerguard_core::{Config, Report, ReportFormat, TextOptions, ViolationStore};
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::ParserCache;
use crate::collector::FileCollector;
use crate::extractor::LanguageExtractor;
use crate::layer::{normalize, LayerClassifier};
use crate::rules::{all_rules, RuleBox, RuleContext};
use crate::typescript::TypeScriptExtractor;

/// Errors that abort an analysis run.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzeError {
    /// The source root does not exist.
    #[error("source root does not exist: {}", path.display())]
    #[diagnostic(
        code(layerguard::source_root),
        help("pass the project directory, or set `analyzer.root` in layerguard.toml")
    )]
    SourceRootNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The source root is a file.
    #[error("source root is not a directory: {}", path.display())]
    #[diagnostic(code(layerguard::source_root))]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// IO error resolving the root or writing the report.
    #[error("IO error: {0}")]
    #[diagnostic(code(layerguard::io))]
    Io(#[from] std::io::Error),

    /// The structured report could not be serialized.
    #[error("failed to render report: {0}")]
    #[diagnostic(code(layerguard::render))]
    Render(#[from] serde_json::Error),
}

/// Caller-facing options for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Include info-severity entries in text output.
    pub detailed: bool,
    /// Report format.
    pub format: ReportFormat,
    /// Reserved; accepted but has no effect.
    pub fix: bool,
    /// Colour text output.
    pub color: bool,
}

impl AnalyzeOptions {
    fn text(self) -> TextOptions {
        TextOptions {
            detailed: self.detailed,
            color: self.color,
        }
    }
}

/// Analyzes one TypeScript source tree.
pub struct Analyzer {
    root: PathBuf,
    options: AnalyzeOptions,
    config: Config,
    rules: Vec<RuleBox>,
}

impl Analyzer {
    /// Creates an analyzer for `source_root` with every built-in rule.
    ///
    /// Relative roots are resolved against the current directory. The
    /// root is not checked until [`Analyzer::run`].
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, options: AnalyzeOptions) -> Self {
        let root = source_root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir().map_or(root.clone(), |cwd| cwd.join(&root))
        };
        Self {
            root: normalize(&root),
            options,
            config: Config::default(),
            rules: all_rules(),
        }
    }

    /// Applies rule toggles and extra exclusions from a loaded config.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the source root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the options this analyzer renders with.
    #[must_use]
    pub fn options(&self) -> AnalyzeOptions {
        self.options
    }

    /// Runs the full pipeline and prints the report to standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing or the report cannot
    /// be written.
    pub fn analyze(&self) -> Result<Report, AnalyzeError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.analyze_to(&mut out)
    }

    /// Runs the full pipeline and writes the report to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing or writing fails.
    pub fn analyze_to<W: Write>(&self, out: &mut W) -> Result<Report, AnalyzeError> {
        let report = self.run()?;
        let rendered = report.render(self.options.format, self.options.text())?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(report)
    }

    /// Runs the pipeline without rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing.
    pub fn run(&self) -> Result<Report, AnalyzeError> {
        self.check_root()?;
        info!("Starting analysis at {}", self.root.display());
        if self.options.fix {
            warn!("Automatic fixing is not supported; reporting only");
        }

        let extractor = TypeScriptExtractor::new();
        let files = FileCollector::new(extractor.extensions())
            .skip_dirs(self.config.analyzer.exclude.iter().cloned())
            .collect(&self.root);
        info!("Found {} {} file(s) to analyze", files.len(), extractor.language_id());

        let mut store = ViolationStore::new(&self.root);
        store.set_files_scanned(files.len());

        let mut cache = ParserCache::new(Box::new(extractor));
        for path in &files {
            debug!("Parsing: {}", path.display());
            cache.parse_file(path, &mut store);
        }

        let classifier = LayerClassifier::new(&self.root);
        let ctx = RuleContext {
            cache: &cache,
            classifier: &classifier,
        };
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            debug!("Running rule: {}", rule.name());
            rule.check(&ctx, &mut store);
        }

        let report = store.into_report();
        info!(
            "Analysis complete: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            report.errors.len(),
            report.warnings.len(),
            report.info.len(),
            report.stats.files_scanned
        );
        Ok(report)
    }

    fn check_root(&self) -> Result<(), AnalyzeError> {
        if !self.root.exists() {
            return Err(AnalyzeError::SourceRootNotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(AnalyzeError::NotADirectory {
                path: self.root.clone(),
            });
        }
        Ok(())
    }
}
