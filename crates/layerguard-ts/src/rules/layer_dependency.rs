//! Layer dependency direction: `infrastructure -> application -> domain`.

use layerguard_core::{ViolationCode, ViolationStore};

use super::{ArchRule, RuleContext};

/// Flags imports that point outward from an inner layer.
///
/// `domain` may not import `application` or `infrastructure`;
/// `application` may not import `infrastructure`. Imports that classify
/// as external, same-layer, or `utils` are never flagged.
pub struct LayerDependency;

impl ArchRule for LayerDependency {
    fn name(&self) -> &'static str {
        "layer-dependency"
    }

    fn description(&self) -> &'static str {
        "Dependencies must point inward: infrastructure -> application -> domain"
    }

    fn codes(&self) -> &'static [ViolationCode] {
        &[ViolationCode::LayerViolation]
    }

    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore) {
        for file in ctx.cache.files() {
            let Some(from) = ctx.classifier.classify_path(&file.path) else {
                continue;
            };
            for import in &file.imports {
                let Some(to) = ctx.classifier.classify_import(&import.module_path, &file.path)
                else {
                    continue;
                };
                if from.forbids(to) {
                    store.record(
                        &file.path,
                        Some(import.line),
                        ViolationCode::LayerViolation,
                        format!(
                            "{from} layer cannot depend on {to} layer (import '{}')",
                            import.module_path
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
    fn domain_importing_outer_layers_is_flagged() {
        let report = run(
            &LayerDependency,
            &[(
                "domain/User.ts",
                "import { A } from '../application/A';\nimport { B } from '../infrastructure/B';\nimport { C } from './C';\n",
            )],
        );
        assert_eq!(codes(&report), vec!["LAYER_VIOLATION", "LAYER_VIOLATION"]);
        assert_eq!(report.errors[0].line, Some(1));
        assert_eq!(report.errors[1].line, Some(2));
        assert_eq!(report.errors[0].file, "domain/User.ts");
        assert!(report.errors[0]
            .message
            .contains("domain layer cannot depend on application layer"));
    }

    #[test]
    fn application_importing_infrastructure_is_flagged() {
        let report = run(
            &LayerDependency,
            &[(
                "application/WidgetService.ts",
                "import { IWidgetRepository } from '../domain/IWidgetRepository';\nimport { WidgetDb } from '../infrastructure/WidgetDb';\n",
            )],
        );
        assert_eq!(codes(&report), vec!["LAYER_VIOLATION"]);
        assert_eq!(report.errors[0].line, Some(2));
    }

    #[test]
    fn inward_and_external_imports_are_allowed() {
        let report = run(
            &LayerDependency,
            &[
                (
                    "infrastructure/Db.ts",
                    "import { A } from '../application/A';\nimport { U } from '../domain/U';\nimport pg from 'pg';\n",
                ),
                (
                    "domain/User.ts",
                    "import { v4 } from 'uuid';\nimport { h } from '../utils/h';\n",
                ),
                ("index.ts", "import { Db } from './infrastructure/Db';\n"),
            ],
        );
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn bare_specifier_with_layer_name_is_classified() {
        let report = run(
            &LayerDependency,
            &[(
                "domain/User.ts",
                "import { Db } from '@app/infrastructure/db';\n",
            )],
        );
        assert_eq!(codes(&report), vec!["LAYER_VIOLATION"]);
    }
}
