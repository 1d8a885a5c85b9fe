//! layerguard CLI tool.
//!
//! Usage:
//! ```bash
//! layerguard check [OPTIONS] [PATH]
//! layerguard list-rules
//! layerguard init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use layerguard_core::ReportFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Layered-architecture checker for TypeScript projects
#[derive(Parser)]
#[command(name = "layerguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project's source tree
    Check {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Show info-level findings in text output
        #[arg(long)]
        detailed: bool,

        /// Emit the report as JSON (same as `--format json`)
        #[arg(long, conflicts_with = "format")]
        json: bool,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Accepted for compatibility; fixing is not supported
        #[arg(long)]
        fix: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Console,
            OutputFormat::Json => Self::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins unless --verbose asks for everything
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            detailed,
            json,
            format,
            fix,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let flags = commands::check::CheckFlags {
                detailed,
                format: if json { Some(OutputFormat::Json) } else { format },
                fix,
            };
            commands::check::run(&path, flags, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
