//! Error classes must inherit from `DomainError` or `Error`.

use layerguard_core::{ViolationCode, ViolationStore};

use super::{ArchRule, RuleContext};
use crate::layer::Layer;

const MARKER: &str = "Error";
const DOMAIN_ERROR: &str = "DomainError";
const NATIVE_ERROR: &str = "Error";

/// Classes named `*Error*` extend `DomainError` or `Error`; inside the
/// domain layer, `DomainError` is preferred.
pub struct ErrorInheritance;

impl ArchRule for ErrorInheritance {
    fn name(&self) -> &'static str {
        "error-inheritance"
    }

    fn description(&self) -> &'static str {
        "Error classes extend DomainError (or Error outside the domain)"
    }

    fn codes(&self) -> &'static [ViolationCode] {
        &[ViolationCode::ErrorInheritance, ViolationCode::UseDomainError]
    }

    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore) {
        for file in ctx.cache.files() {
            for class in file.classes.iter().filter(|c| c.name.contains(MARKER)) {
                let domain_base = class.extends_named(DOMAIN_ERROR);
                let native_base = class.extends_named(NATIVE_ERROR);

                if !domain_base && !native_base {
                    store.record(
                        &file.path,
                        Some(class.line),
                        ViolationCode::ErrorInheritance,
                        format!(
                            "Error class '{}' must extend {DOMAIN_ERROR} or {NATIVE_ERROR}",
                            class.name
                        ),
                    );
                    continue;
                }

                if native_base
                    && !domain_base
                    && class.name != DOMAIN_ERROR
                    && ctx.classifier.classify_path(&file.path) == Some(Layer::Domain)
                {
                    store.record(
                        &file.path,
                        Some(class.line),
                        ViolationCode::UseDomainError,
                        format!(
                            "Domain error '{}' should extend {DOMAIN_ERROR} instead of {NATIVE_ERROR}",
                            class.name
                        ),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{codes, run};

    #[test]
    fn domain_error_subclass_is_clean() {
        let report = run(
            &ErrorInheritance,
            &[
                (
                    "domain/errors/DomainError.ts",
                    "export class DomainError extends Error {}\n",
                ),
                (
                    "domain/errors/WidgetNotFoundError.ts",
                    "export class WidgetNotFoundError extends DomainError {}\n",
                ),
            ],
        );
        assert!(codes(&report).is_empty(), "{:?}", codes(&report));
    }

    #[test]
    fn missing_base_is_an_error() {
        let report = run(
            &ErrorInheritance,
            &[
                ("application/TimeoutError.ts", "export class TimeoutError {}\n"),
                (
                    "utils/ParseError.ts",
                    "export class ParseError extends BaseFailure {}\n",
                ),
            ],
        );
        assert_eq!(codes(&report), vec!["ERROR_INHERITANCE", "ERROR_INHERITANCE"]);
    }

    #[test]
    fn native_error_in_domain_is_a_warning() {
        let report = run(
            &ErrorInheritance,
            &[(
                "domain/InvalidWidgetError.ts",
                "export class InvalidWidgetError extends Error {}\n",
            )],
        );
        assert_eq!(codes(&report), vec!["USE_DOMAIN_ERROR"]);
        assert!(report.warnings[0].message.contains("DomainError"));
    }

    #[test]
    fn native_error_outside_domain_is_fine() {
        let report = run(
            &ErrorInheritance,
            &[(
                "infrastructure/DbError.ts",
                "export class DbError extends Error {\n  constructor(msg: string) { super(msg); }\n}\n",
            )],
        );
        assert!(codes(&report).is_empty());
    }

    #[test]
    fn qualified_base_is_recognised() {
        let report = run(
            &ErrorInheritance,
            &[(
                "domain/ConflictError.ts",
                "export class ConflictError extends errors.DomainError {}\n",
            )],
        );
        assert!(codes(&report).is_empty());
    }
}
