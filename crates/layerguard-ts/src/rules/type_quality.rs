//! Raw-text scan for `any` type annotations.

use std::sync::LazyLock;

use layerguard_core::{ViolationCode, ViolationStore};
use regex::Regex;

use super::{ArchRule, RuleContext};

/// `: any` followed by whitespace, `;`, `,` or `)`.
///
/// Text-based: generic positions like `Array<any>` are missed and matches
/// inside strings or comments are counted.
#[allow(clippy::expect_used)]
static ANY_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*any[\s;,)]").expect("valid regex"));

/// Number of `any` annotations in `source`.
#[must_use]
pub fn count_any_annotations(source: &str) -> usize {
    ANY_ANNOTATION.find_iter(source).count()
}

/// Warns once per file that uses `any` annotations.
pub struct TypeQuality;

impl ArchRule for TypeQuality {
    fn name(&self) -> &'static str {
        "type-quality"
    }

    fn description(&self) -> &'static str {
        "Avoid the untyped `any` escape hatch"
    }

    fn codes(&self) -> &'static [ViolationCode] {
        &[ViolationCode::AnyType]
    }

    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore) {
        for file in ctx.cache.files() {
            let count = count_any_annotations(&file.raw_content);
            if count > 0 {
                store.record(
                    &file.path,
                    None,
                    ViolationCode::AnyType,
                    format!("Found {count} 'any' type annotation(s); use a specific type or 'unknown'"),
                );
            }
        }
    }
}
