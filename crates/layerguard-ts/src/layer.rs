//! Layer classification: maps file paths and import specifiers to layers.
//!
//! Classification is a cheap heuristic. File paths are classified by their
//! first directory under the source root. Relative imports are resolved
//! lexically against the importing file; bare specifiers are classified by
//! substring, so an external package whose name happens to contain
//! `domain` is treated as the domain layer.

use std::path::{Component, Path, PathBuf};

/// An architectural layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Entities, value objects, repository contracts. Depends on nothing.
    Domain,
    /// Use cases and services. May depend on domain.
    Application,
    /// Adapters and persistence. May depend on application and domain.
    Infrastructure,
    /// Shared helpers. Unconstrained.
    Utils,
}

impl Layer {
    /// All layers, in substring-matching order.
    pub const ALL: [Self; 4] = [
        Self::Domain,
        Self::Application,
        Self::Infrastructure,
        Self::Utils,
    ];

    /// Directory segment naming this layer.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Application => "application",
            Self::Infrastructure => "infrastructure",
            Self::Utils => "utils",
        }
    }

    /// Layer for an exact directory segment.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.segment() == segment)
    }

    /// Whether an import from `self` into `target` breaks the
    /// `infrastructure -> application -> domain` direction.
    #[must_use]
    pub fn forbids(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Domain, Self::Application | Self::Infrastructure)
                | (Self::Application, Self::Infrastructure)
        )
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

/// Classifies files and imports relative to one source root.
#[derive(Debug, Clone)]
pub struct LayerClassifier {
    root: PathBuf,
}

impl LayerClassifier {
    /// Creates a classifier for the given source root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: normalize(&root.into()),
        }
    }

    /// The source root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Layer of a file, from the first path segment under the root.
    #[must_use]
    pub fn classify_path(&self, path: &Path) -> Option<Layer> {
        classify_path(path, &self.root)
    }

    /// Layer an import specifier points into; `None` means external.
    #[must_use]
    pub fn classify_import(&self, specifier: &str, importing_file: &Path) -> Option<Layer> {
        if is_relative_specifier(specifier) {
            let dir = importing_file.parent().unwrap_or(Path::new(""));
            return classify_path(&dir.join(specifier), &self.root);
        }
        Layer::ALL
            .into_iter()
            .find(|l| specifier.contains(l.segment()))
    }

    /// Whether `path` sits in a `<segment>` directory somewhere below the
    /// given layer (e.g. `infrastructure/**/repositories/`).
    #[must_use]
    pub fn in_layer_subdir(&self, path: &Path, layer: Layer, segment: &str) -> bool {
        if self.classify_path(path) != Some(layer) {
            return false;
        }
        let Ok(rel) = normalize(path).strip_prefix(&self.root).map(Path::to_path_buf) else {
            return false;
        };
        let dirs = rel.parent().unwrap_or(Path::new(""));
        dirs.components()
            .skip(1)
            .any(|c| c.as_os_str() == segment)
    }
}

/// Layer of `path` from its first segment under `root`.
#[must_use]
pub fn classify_path(path: &Path, root: &Path) -> Option<Layer> {
    let path = normalize(path);
    let root = normalize(root);
    let rel = path.strip_prefix(&root).ok()?;
    match rel.components().next()? {
        Component::Normal(first) => Layer::from_segment(first.to_str()?),
        _ => None,
    }
}

/// `./x`, `../x`, `.`, or `..`.
#[must_use]
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Lexically resolves `.` and `..` components without touching the disk.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
