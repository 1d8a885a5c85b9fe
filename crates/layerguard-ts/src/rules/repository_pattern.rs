//! Repository placement and constructor injection.

use layerguard_core::{ViolationCode, ViolationStore};

use super::{ArchRule, RuleContext};
use crate::layer::Layer;

const MARKER: &str = "Repository";
const IMPL_DIR: &str = "repositories";

/// Repository contracts live in `domain`; implementations live in
/// `infrastructure/**/repositories` and take their dependencies through a
/// constructor.
pub struct RepositoryPattern;

impl ArchRule for RepositoryPattern {
    fn name(&self) -> &'static str {
        "repository-pattern"
    }

    fn description(&self) -> &'static str {
        "Repository interfaces in domain, implementations in infrastructure/repositories with DI"
    }

    fn codes(&self) -> &'static [ViolationCode] {
        &[ViolationCode::RepositoryLocation, ViolationCode::RepositoryDi]
    }

    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore) {
        let interfaces = ctx.cache.files().flat_map(|f| {
            f.interfaces
                .iter()
                .filter(|i| i.name.contains(MARKER))
                .map(move |i| (f, i))
        });
        for (file, iface) in interfaces {
            if ctx.classifier.classify_path(&file.path) != Some(Layer::Domain) {
                store.record(
                    &file.path,
                    Some(iface.line),
                    ViolationCode::RepositoryLocation,
                    format!(
                        "Repository interface '{}' should be declared in the domain layer",
                        iface.name
                    ),
                );
            }
        }

        let classes = ctx.cache.files().flat_map(|f| {
            f.classes
                .iter()
                .filter(|c| c.name.contains(MARKER))
                .map(move |c| (f, c))
        });
        for (file, class) in classes {
            if !ctx
                .classifier
                .in_layer_subdir(&file.path, Layer::Infrastructure, IMPL_DIR)
            {
                store.record(
                    &file.path,
                    Some(class.line),
                    ViolationCode::RepositoryLocation,
                    format!(
                        "Repository implementation '{}' should live in infrastructure/{IMPL_DIR}",
                        class.name
                    ),
                );
            }
            if !class.has_constructor {
                store.record(
                    &file.path,
                    Some(class.line),
                    ViolationCode::RepositoryDi,
                    format!(
                        "Repository '{}' should receive its dependencies through a constructor",
                        class.name
                    ),
                );
            }
        }
    }
}
