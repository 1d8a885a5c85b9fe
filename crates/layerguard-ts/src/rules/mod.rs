//! Rule checks over the fully populated parse cache.
//!
//! Each check is independent and order-insensitive. Checks never fail:
//! findings are appended to the [`ViolationStore`].

use layerguard_core::{ViolationCode, ViolationStore};

use crate::cache::ParserCache;
use crate::layer::LayerClassifier;

mod error_inheritance;
mod interface_convention;
mod layer_dependency;
mod repository_pattern;
mod service_pattern;
mod type_quality;

pub use error_inheritance::ErrorInheritance;
pub use interface_convention::InterfaceConvention;
pub use layer_dependency::LayerDependency;
pub use repository_pattern::RepositoryPattern;
pub use service_pattern::ServicePattern;
pub use type_quality::TypeQuality;

/// Read-only inputs shared by every rule check.
pub struct RuleContext<'a> {
    /// Parsed files for this run.
    pub cache: &'a ParserCache,
    /// Layer classifier bound to the source root.
    pub classifier: &'a LayerClassifier,
}

/// A project-wide architecture rule.
pub trait ArchRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g. `"layer-dependency"`).
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Codes this rule may emit.
    fn codes(&self) -> &'static [ViolationCode];

    /// Runs the check, appending findings to `store`.
    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore);
}

/// Type alias for boxed `ArchRule` trait objects.
pub type RuleBox = Box<dyn ArchRule>;

/// Every built-in rule, in reporting order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LayerDependency),
        Box::new(InterfaceConvention),
        Box::new(RepositoryPattern),
        Box::new(ServicePattern),
        Box::new(ErrorInheritance),
        Box::new(TypeQuality),
    ]
}

/// Names of every built-in rule, for config validation.
#[must_use]
pub fn rule_names() -> Vec<&'static str> {
    all_rules().iter().map(|r| r.name()).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Builds a parse cache from in-memory sources under a fake root.

    use std::path::{Path, PathBuf};

    use layerguard_core::{Report, ViolationStore};

    use super::{ArchRule, RuleContext};
    use crate::cache::ParserCache;
    use crate::layer::LayerClassifier;
    use crate::typescript::TypeScriptExtractor;

    pub(crate) fn run(rule: &dyn ArchRule, files: &[(&str, &str)]) -> Report {
        let tmp = tempfile::TempDir::new().unwrap();
        let root: PathBuf = tmp.path().to_path_buf();
        let mut store = ViolationStore::new(&root);
        let mut cache = ParserCache::new(Box::new(TypeScriptExtractor::new()));
        for (rel, content) in files {
            let path = root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap_or(Path::new("."))).unwrap();
            std::fs::write(&path, content).unwrap();
            cache.parse_file(&path, &mut store);
        }
        let classifier = LayerClassifier::new(&root);
        let ctx = RuleContext {
            cache: &cache,
            classifier: &classifier,
        };
        rule.check(&ctx, &mut store);
        store.into_report()
    }

    pub(crate) fn codes(report: &Report) -> Vec<&'static str> {
        report.iter().map(|v| v.code.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_and_names() {
        assert_eq!(
            rule_names(),
            vec![
                "layer-dependency",
                "interface-convention",
                "repository-pattern",
                "service-pattern",
                "error-inheritance",
                "type-quality",
            ]
        );
    }

    #[test]
    fn every_code_except_parse_error_has_an_owner() {
        let rules = all_rules();
        for code in ViolationCode::ALL {
            let owners = rules.iter().filter(|r| r.codes().contains(&code)).count();
            let expected = usize::from(code != ViolationCode::ParseError);
            assert_eq!(owners, expected, "{code} owned by {owners} rule(s)");
        }
    }
}
