//! Interface naming and one-interface-per-file conventions.

use layerguard_core::{ViolationCode, ViolationStore};

use super::{ArchRule, RuleContext};

/// Whether `name` is `I` followed by an uppercase letter (`IWidget`).
fn has_interface_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Interfaces are `I`-prefixed, and a file holding a single interface is
/// named after it.
pub struct InterfaceConvention;

impl ArchRule for InterfaceConvention {
    fn name(&self) -> &'static str {
        "interface-convention"
    }

    fn description(&self) -> &'static str {
        "Interfaces use the I prefix and live in a file of the same name"
    }

    fn codes(&self) -> &'static [ViolationCode] {
        &[
            ViolationCode::InterfaceNaming,
            ViolationCode::FileNaming,
            ViolationCode::MultipleInterfaces,
        ]
    }

    fn check(&self, ctx: &RuleContext<'_>, store: &mut ViolationStore) {
        for file in ctx.cache.files() {
            let count = file.interfaces.len();
            let mut reported_multiple = false;

            for iface in &file.interfaces {
                if !has_interface_prefix(&iface.name) {
                    store.record(
                        &file.path,
                        Some(iface.line),
                        ViolationCode::InterfaceNaming,
                        format!(
                            "Interface '{}' should be prefixed with 'I' (e.g. 'I{}')",
                            iface.name, iface.name
                        ),
                    );
                }

                if count == 1 && file.base_name() != iface.name {
                    store.record(
                        &file.path,
                        Some(iface.line),
                        ViolationCode::FileNaming,
                        format!(
                            "File '{}' should be named after its interface '{}'",
                            file.base_name(),
                            iface.name
                        ),
                    );
                }

                if count > 1 && !reported_multiple {
                    store.record(
                        &file.path,
                        None,
                        ViolationCode::MultipleInterfaces,
                        format!("File declares {count} interfaces; consider one interface per file"),
                    );
                    reported_multiple = true;
                }
            }
        }
    }
}
