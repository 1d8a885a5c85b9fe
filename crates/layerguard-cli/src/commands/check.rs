//! Check command implementation.

use anyhow::{Context, Result};
use layerguard_core::{Config, ReportFormat};
use layerguard_ts::{rule_names, AnalyzeOptions, Analyzer};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Exit status when the source root cannot be analyzed at all.
const EXIT_FATAL: i32 = 2;

/// Command-line flags that override config values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckFlags {
    /// `--detailed`
    pub detailed: bool,
    /// `--json` or `--format`
    pub format: Option<OutputFormat>,
    /// `--fix`
    pub fix: bool,
}

/// Runs the check command.
pub fn run(path: &Path, flags: CheckFlags, source: &ConfigSource) -> Result<()> {
    tracing::info!("Using {source}");
    let config = source
        .load()
        .with_context(|| format!("Failed to load {source}"))?;
    config
        .validate(&rule_names())
        .context("Config validation failed")?;

    let options = analyze_options(flags, &config, std::io::stdout().is_terminal());
    let root = source_root(path, &config);
    tracing::info!("Checking {}", root.display());

    match Analyzer::new(root, options).config(config).analyze() {
        Ok(report) => {
            if report.has_errors() {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(EXIT_FATAL);
        }
    }
}

/// Merges flags over config values. Colour only applies to text on a terminal.
fn analyze_options(flags: CheckFlags, config: &Config, is_terminal: bool) -> AnalyzeOptions {
    let format = flags
        .format
        .map_or(config.output.format, ReportFormat::from);
    AnalyzeOptions {
        detailed: flags.detailed || config.output.detailed,
        format,
        fix: flags.fix,
        color: is_terminal && format == ReportFormat::Console,
    }
}

fn source_root(project: &Path, config: &Config) -> PathBuf {
    if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        project.join(&config.analyzer.root)
    }
}
