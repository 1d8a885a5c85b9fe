//! # layerguard-ts
//!
//! Tree-sitter based layered-architecture checker for TypeScript.
//!
//! The pipeline is [`FileCollector`] -> [`ParserCache`] -> rule checks ->
//! [`layerguard_core::Report`], driven by [`Analyzer`]:
//!
//! - [`LanguageExtractor`] / [`TypeScriptExtractor`] turn source text into
//!   import, export, class, and interface facts
//! - [`LayerClassifier`] maps paths and import specifiers to [`Layer`]s
//! - [`rules`] holds the six independent [`ArchRule`] checks
//!
//! ```no_run
//! use layerguard_ts::{AnalyzeOptions, Analyzer};
//!
//! let report = Analyzer::new("./src", AnalyzeOptions::default()).analyze()?;
//! std::process::exit(i32::from(report.has_errors()));
//! # Ok::<(), layerguard_ts::AnalyzeError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod cache;
pub mod collector;
pub mod extractor;
pub mod layer;
pub mod rules;
pub mod typescript;

pub use analyzer::{AnalyzeError, AnalyzeOptions, Analyzer};
pub use cache::ParserCache;
pub use collector::FileCollector;
pub use extractor::{
    ClassFact, ExportFact, FileFacts, ImportFact, InterfaceFact, LanguageExtractor, ParseFailure,
    SourceFile, TypeRef,
};
pub use layer::{Layer, LayerClassifier};
pub use rules::{all_rules, rule_names, ArchRule, RuleContext};
pub use typescript::TypeScriptExtractor;
