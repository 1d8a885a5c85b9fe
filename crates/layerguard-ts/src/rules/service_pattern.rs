//! Service placement and constructor injection.

use layerguard_core::{ViolationCode, ViolationStore};

use super::{ArchRule, RuleContext};
use crate::layer::Layer;

const SUFFIX: &str = "Service";

/// Service contracts live in `application`; service classes take their
/// dependencies through a constructor.
pub struct ServicePattern;

impl ArchRule for ServicePattern {
    fn name(&self) -> &'static str {
        "service-pattern"
    }

    fn description(&self) -> &'static str {
        "Service interfaces in application, service classes with constructor injection"
    }

    fn codes(&self) -> &'static [ViolationCode] {
        &[ViolationCode::ServiceLocation, ViolationCode::ServiceDi]
    }

    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore) {
        for file in ctx.cache.files() {
            let layer = ctx.classifier.classify_path(&file.path);

            for iface in file.interfaces.iter().filter(|i| i.name.ends_with(SUFFIX)) {
                if layer != Some(Layer::Application) {
                    store.record(
                        &file.path,
                        Some(iface.line),
                        ViolationCode::ServiceLocation,
                        format!(
                            "Service interface '{}' should be declared in the application layer",
                            iface.name
                        ),
                    );
                }
            }

            for class in file.classes.iter().filter(|c| c.name.ends_with(SUFFIX)) {
                if !class.has_constructor {
                    store.record(
                        &file.path,
                        Some(class.line),
                        ViolationCode::ServiceDi,
                        format!(
                            "Service '{}' should receive its dependencies through a constructor",
                            class.name
                        ),
                    );
                }
            }
        }
    }
}
