//! Core types for architecture violations.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Severity level for architecture violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory message, shown only in detailed mode.
    Info,
    /// Pattern deviation that should be addressed.
    Warning,
    /// Architectural breach that must be fixed; fails the run.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Closed set of violation codes emitted by the analyzer.
///
/// Every rule check emits only the codes it lists, so adding a code here
/// forces every `match` over the taxonomy to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    /// A source file could not be read or parsed.
    ParseError,
    /// An import points against the allowed layer direction.
    LayerViolation,
    /// Interface name lacks the `I` prefix.
    InterfaceNaming,
    /// File base name differs from its single interface.
    FileNaming,
    /// File declares more than one interface.
    MultipleInterfaces,
    /// Repository interface or class in the wrong place.
    RepositoryLocation,
    /// Repository class without a constructor.
    RepositoryDi,
    /// Service interface outside the application layer.
    ServiceLocation,
    /// Service class without a constructor.
    ServiceDi,
    /// Error class that extends neither `DomainError` nor `Error`.
    ErrorInheritance,
    /// Domain error class extending the native `Error`.
    UseDomainError,
    /// Untyped `any` annotations found in the file.
    AnyType,
}

impl ViolationCode {
    /// All codes, in taxonomy order.
    pub const ALL: [Self; 12] = [
        Self::ParseError,
        Self::LayerViolation,
        Self::InterfaceNaming,
        Self::FileNaming,
        Self::MultipleInterfaces,
        Self::RepositoryLocation,
        Self::RepositoryDi,
        Self::ServiceLocation,
        Self::ServiceDi,
        Self::ErrorInheritance,
        Self::UseDomainError,
        Self::AnyType,
    ];

    /// The wire name of this code (e.g. `"LAYER_VIOLATION"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::LayerViolation => "LAYER_VIOLATION",
            Self::InterfaceNaming => "INTERFACE_NAMING",
            Self::FileNaming => "FILE_NAMING",
            Self::MultipleInterfaces => "MULTIPLE_INTERFACES",
            Self::RepositoryLocation => "REPOSITORY_LOCATION",
            Self::RepositoryDi => "REPOSITORY_DI",
            Self::ServiceLocation => "SERVICE_LOCATION",
            Self::ServiceDi => "SERVICE_DI",
            Self::ErrorInheritance => "ERROR_INHERITANCE",
            Self::UseDomainError => "USE_DOMAIN_ERROR",
            Self::AnyType => "ANY_TYPE",
        }
    }

    /// Severity this code is always reported with.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::ParseError
            | Self::LayerViolation
            | Self::RepositoryLocation
            | Self::ErrorInheritance => Severity::Error,
            Self::InterfaceNaming
            | Self::FileNaming
            | Self::RepositoryDi
            | Self::ServiceLocation
            | Self::ServiceDi
            | Self::UseDomainError
            | Self::AnyType => Severity::Warning,
            Self::MultipleInterfaces => Severity::Info,
        }
    }

    /// One-line description used by `list-rules`.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ParseError => "file could not be read or parsed",
            Self::LayerViolation => "import breaks infrastructure -> application -> domain",
            Self::InterfaceNaming => "interface name must start with `I`",
            Self::FileNaming => "file name must match its single interface",
            Self::MultipleInterfaces => "file declares more than one interface",
            Self::RepositoryLocation => {
                "repository interfaces belong in domain, classes in infrastructure/repositories"
            }
            Self::RepositoryDi => "repository class must declare a constructor",
            Self::ServiceLocation => "service interfaces belong in application",
            Self::ServiceDi => "service class must declare a constructor",
            Self::ErrorInheritance => "error class must extend DomainError or Error",
            Self::UseDomainError => "domain error class should extend DomainError",
            Self::AnyType => "avoid `any` type annotations",
        }
    }
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding recorded by a rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Severity bucket this violation belongs to.
    pub severity: Severity,
    /// File path relative to the analysis root, `/`-separated.
    pub file: String,
    /// Line number (1-indexed); `None` for file-level findings.
    pub line: Option<usize>,
    /// Violation code.
    pub code: ViolationCode,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        severity: Severity,
        file: impl Into<String>,
        line: Option<usize>,
        code: ViolationCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            file: file.into(),
            line,
            code,
            message: message.into(),
        }
    }

    /// `file:line`, or just `file` for file-level findings.
    #[must_use]
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.file),
            None => self.file.clone(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.location(), self.code, self.message)
    }
}

/// Renders `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are rendered as given.
#[must_use]
pub fn relative_display(path: &Path, root: &Path) -> String {
    let rel: PathBuf = path
        .strip_prefix(root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => None,
        })
        .collect();
    let joined = parts.join("/");
    if rel.has_root() {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ViolationCode::RepositoryDi).unwrap();
        assert_eq!(json, "\"REPOSITORY_DI\"");
        for code in ViolationCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn code_severities_match_taxonomy() {
        assert_eq!(ViolationCode::LayerViolation.severity(), Severity::Error);
        assert_eq!(ViolationCode::AnyType.severity(), Severity::Warning);
        assert_eq!(ViolationCode::MultipleInterfaces.severity(), Severity::Info);
    }

    #[test]
    fn location_omits_missing_line() {
        let v = Violation::new(
            Severity::Warning,
            "utils/helper.ts",
            None,
            ViolationCode::AnyType,
            "2 any",
        );
        assert_eq!(v.location(), "utils/helper.ts");
        assert_eq!(v.to_string(), "utils/helper.ts [ANY_TYPE] 2 any");
    }

    #[test]
    fn location_includes_line() {
        let v = Violation::new(
            Severity::Error,
            "domain/User.ts",
            Some(3),
            ViolationCode::LayerViolation,
            "nope",
        );
        assert_eq!(v.location(), "domain/User.ts:3");
    }

    #[test]
    fn relative_display_strips_root() {
        let root = Path::new("/project/src");
        let file = Path::new("/project/src/domain/model/User.ts");
        assert_eq!(relative_display(file, root), "domain/model/User.ts");
    }

    #[test]
    fn relative_display_keeps_foreign_paths() {
        let root = Path::new("/project/src");
        let file = Path::new("/elsewhere/User.ts");
        assert_eq!(relative_display(file, root), "/elsewhere/User.ts");
    }
}
