//! Per-run parse cache: each file is parsed at most once.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use layerguard_core::{ViolationCode, ViolationStore};

use crate::extractor::{LanguageExtractor, ParseFailure, SourceFile};

/// Fact bundles for one run, keyed by absolute path.
///
/// Files that fail to parse are recorded as `PARSE_ERROR` and remembered,
/// so they are neither re-parsed nor visible to rule checks.
pub struct ParserCache {
    extractor: Box<dyn LanguageExtractor>,
    files: BTreeMap<PathBuf, SourceFile>,
    failed: BTreeSet<PathBuf>,
}

impl ParserCache {
    /// Creates an empty cache backed by the given extractor.
    #[must_use]
    pub fn new(extractor: Box<dyn LanguageExtractor>) -> Self {
        Self {
            extractor,
            files: BTreeMap::new(),
            failed: BTreeSet::new(),
        }
    }

    /// Parses `path` unless it was already attempted, and returns its facts.
    ///
    /// A failure is recorded in `store` the first time only.
    pub fn parse_file(&mut self, path: &Path, store: &mut ViolationStore) -> Option<&SourceFile> {
        if self.failed.contains(path) {
            return None;
        }
        if !self.files.contains_key(path) {
            match self.load(path) {
                Ok(file) => {
                    tracing::debug!(
                        "Parsed {}: {} import(s), {} export(s), {} class(es), {} interface(s)",
                        path.display(),
                        file.imports.len(),
                        file.exports.len(),
                        file.classes.len(),
                        file.interfaces.len()
                    );
                    self.files.insert(path.to_path_buf(), file);
                }
                Err(failure) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), failure);
                    store.record(
                        path,
                        None,
                        ViolationCode::ParseError,
                        format!("Failed to parse file: {failure}"),
                    );
                    self.failed.insert(path.to_path_buf());
                    return None;
                }
            }
        }
        self.files.get(path)
    }

    fn load(&self, path: &Path) -> Result<SourceFile, ParseFailure> {
        let bytes = std::fs::read(path)
            .map_err(|e| ParseFailure::new(format!("cannot read file: {e}")))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ParseFailure::new(format!("file is not valid UTF-8: {e}")))?;
        let facts = self.extractor.analyze(&content)?;
        Ok(SourceFile::new(path, content, facts))
    }

    /// Facts for `path`, if it parsed.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    /// All parsed files, ordered by path.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// Number of files that parsed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files that failed to parse.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::TypeScriptExtractor;
    use std::fs;
    use tempfile::TempDir;

    fn cache() -> ParserCache {
        ParserCache::new(Box::new(TypeScriptExtractor::new()))
    }

    #[test]
    fn parses_and_caches() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("IWidget.ts");
        fs::write(&file, "export interface IWidget {}\n").unwrap();

        let mut store = ViolationStore::new(tmp.path());
        let mut c = cache();
        let facts = c.parse_file(&file, &mut store).expect("should parse");
        assert_eq!(facts.interfaces[0].name, "IWidget");
        assert_eq!(facts.raw_content, "export interface IWidget {}\n");

        // second call is served from the cache even after the file changes
        fs::write(&file, "export interface IOther {}\n").unwrap();
        let again = c.parse_file(&file, &mut store).unwrap();
        assert_eq!(again.interfaces[0].name, "IWidget");
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn parse_failure_is_recorded_once_and_excluded() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("broken.ts");
        fs::write(&file, "class {{{\n").unwrap();

        let mut store = ViolationStore::new(tmp.path());
        let mut c = cache();
        assert!(c.parse_file(&file, &mut store).is_none());
        assert!(c.parse_file(&file, &mut store).is_none());

        assert_eq!(store.errors().len(), 1);
        assert_eq!(store.errors()[0].code, ViolationCode::ParseError);
        assert_eq!(store.errors()[0].file, "broken.ts");
        assert!(c.get(&file).is_none());
        assert!(c.is_empty());
        assert_eq!(c.failed_count(), 1);
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("binary.ts");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        let mut store = ViolationStore::new(tmp.path());
        assert!(cache().parse_file(&file, &mut store).is_none());
        assert!(store.errors()[0].message.contains("UTF-8"));
    }
}
