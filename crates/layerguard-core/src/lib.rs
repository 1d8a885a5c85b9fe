//! # layerguard-core
//!
//! Language-independent building blocks for layered-architecture checks.
//!
//! - [`Violation`] and the closed [`ViolationCode`] taxonomy
//! - [`ViolationStore`] for accumulating findings into severity buckets
//! - [`Report`] for rendering a finished run as text or JSON
//! - [`Config`] for TOML-based configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod report;
mod store;
mod types;

pub use config::{AnalyzerConfig, Config, ConfigError, OutputConfig, RuleConfig};
pub use report::{Report, ReportFormat, TextOptions};
pub use store::{Stats, ViolationStore};
pub use types::{relative_display, Severity, Violation, ViolationCode};
