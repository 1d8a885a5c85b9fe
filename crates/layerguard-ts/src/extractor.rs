//! Structural facts extracted from a source file.
//!
//! `LanguageExtractor` is the seam between the parser backend and the rule
//! checks: rules only ever see the fact bundle, never the syntax tree.

use std::path::{Path, PathBuf};

/// A single import declaration with a string module specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFact {
    /// Module specifier without quotes (e.g. `../infrastructure/WidgetDb`).
    pub module_path: String,
    /// Line number (1-indexed).
    pub line: usize,
}

/// A reference to a type in an `extends` or `implements` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Source text of the reference, as written.
    pub text: String,
}

impl TypeRef {
    /// Creates a reference from its source text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Name without type arguments or qualifying namespaces.
    ///
    /// `errors.DomainError<T>` yields `DomainError`.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let base = self.text.split('<').next().unwrap_or("").trim();
        base.rsplit('.').next().unwrap_or(base).trim()
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFact {
    /// Class name.
    pub name: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Whether the class body defines a `constructor`.
    pub has_constructor: bool,
    /// Types in the `extends` clause.
    pub extends: Vec<TypeRef>,
    /// Types in the `implements` clause.
    pub implements: Vec<TypeRef>,
}

impl ClassFact {
    /// Whether any `extends` entry has the given simple name.
    #[must_use]
    pub fn extends_named(&self, name: &str) -> bool {
        self.extends.iter().any(|t| t.simple_name() == name)
    }
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFact {
    /// Interface name.
    pub name: String,
    /// Line number (1-indexed).
    pub line: usize,
}

/// A name made visible by an `export` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFact {
    /// Exported name (`default` for default exports).
    pub name: String,
    /// Line number (1-indexed).
    pub line: usize,
}

/// Facts extracted from one file's syntax tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFacts {
    /// Import declarations, in source order.
    pub imports: Vec<ImportFact>,
    /// Exported names, in source order.
    pub exports: Vec<ExportFact>,
    /// Class declarations, in source order (nested ones included).
    pub classes: Vec<ClassFact>,
    /// Interface declarations, in source order (nested ones included).
    pub interfaces: Vec<InterfaceFact>,
}

/// The cached fact bundle for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path.
    pub path: PathBuf,
    /// File contents as read from disk.
    pub raw_content: String,
    /// Import declarations.
    pub imports: Vec<ImportFact>,
    /// Exported names.
    pub exports: Vec<ExportFact>,
    /// Class declarations.
    pub classes: Vec<ClassFact>,
    /// Interface declarations.
    pub interfaces: Vec<InterfaceFact>,
}

impl SourceFile {
    /// Bundles extracted facts with their file.
    #[must_use]
    pub fn new(path: &Path, raw_content: String, facts: FileFacts) -> Self {
        let FileFacts {
            imports,
            exports,
            classes,
            interfaces,
        } = facts;
        Self {
            path: path.to_path_buf(),
            raw_content,
            imports,
            exports,
            classes,
            interfaces,
        }
    }

    /// File name without its final extension (`IWidget.ts` -> `IWidget`).
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// Why a file could not be turned into facts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseFailure {
    /// Human-readable reason.
    pub message: String,
    /// Line of the first syntax error, when known (1-indexed).
    pub line: Option<usize>,
}

impl ParseFailure {
    /// Failure without a source position.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Failure at a known line.
    #[must_use]
    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

/// Language-specific parsing backend.
///
/// The extractor receives raw source text and returns the
/// language-agnostic [`FileFacts`], or a [`ParseFailure`] when the text is
/// not valid source for the language.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g. `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g. `&[".ts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract imports, exports, classes, and interfaces from source code.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] when the source does not parse cleanly.
    fn analyze(&self, source: &str) -> Result<FileFacts, ParseFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_generics_and_namespaces() {
        assert_eq!(TypeRef::new("DomainError").simple_name(), "DomainError");
        assert_eq!(TypeRef::new("errors.DomainError").simple_name(), "DomainError");
        assert_eq!(TypeRef::new("Base<T, U>").simple_name(), "Base");
        assert_eq!(TypeRef::new("ns.Repo<Widget>").simple_name(), "Repo");
    }

    #[test]
    fn extends_named_matches_simple_name() {
        let class = ClassFact {
            name: "NotFoundError".into(),
            line: 1,
            has_constructor: false,
            extends: vec![TypeRef::new("shared.DomainError")],
            implements: vec![],
        };
        assert!(class.extends_named("DomainError"));
        assert!(!class.extends_named("Error"));
    }

    #[test]
    fn base_name_drops_extension() {
        let file = SourceFile::new(
            Path::new("/src/domain/IWidget.ts"),
            String::new(),
            FileFacts::default(),
        );
        assert_eq!(file.base_name(), "IWidget");
    }
}
