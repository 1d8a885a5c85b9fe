//! Source file discovery.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "coverage",
    ".git",
    ".next",
    ".turbo",
    ".nyc_output",
];

/// Suffix marking ambient declaration files.
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Walks a source root and returns eligible source files.
#[derive(Debug, Clone)]
pub struct FileCollector {
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
}

impl FileCollector {
    /// Collector for the given extensions (e.g. `[".ts"]`) with the
    /// built-in skip-list.
    #[must_use]
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| (*e).to_owned()).collect(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| (*d).to_owned()).collect(),
        }
    }

    /// Adds directory names to skip on top of the built-in list.
    #[must_use]
    pub fn skip_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|d| d == name))
    }

    fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if name.ends_with(DECLARATION_SUFFIX) {
            return false;
        }
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Returns the source files under `root`, sorted by path.
    ///
    /// Entries that cannot be read are logged and skipped. The caller is
    /// responsible for checking that `root` exists.
    #[must_use]
    pub fn collect(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_skipped_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if self.is_source_file(entry.path()) {
                files.push(entry.into_path());
            } else {
                tracing::trace!("Ignoring {}", entry.path().display());
            }
        }

        files.sort();
        files
    }
}
