//! The whole-model resolution pass.
//!
//! Runs once, after every file has been through the scope-building pass,
//! and turns textual references into entity edges: mixin targets first,
//! superclasses second. Resolution uses the model's naive lookup; a name
//! that does not resolve is skipped without a diagnostic, while a name that
//! resolves to the wrong kind of entity is reported and skipped.

use model::{Include, IncludeDef, Model};
use tracing::warn;

pub struct BuildInheritance<'a> {
    model: &'a mut Model,
}

impl<'a> BuildInheritance<'a> {
    pub fn run(model: &'a mut Model) {
        let mut phase = BuildInheritance { model };
        phase.build_includes();
        phase.build_superclasses();
    }

    fn build_includes(&mut self) {
        for id in self.model.scope_ids() {
            let pending: Vec<IncludeDef> = self
                .model
                .scope(id)
                .defs()
                .iter()
                .flat_map(|def| def.includes().iter().cloned())
                .collect();
            for include in pending {
                let Some(target) = self.model.lookup_scope(&include.name, Some(id)) else {
                    // Unresolved targets stay silent.
                    continue;
                };
                if !self.model.scope(target).is_module() {
                    warn!(
                        "can only include modules: `{}` into `{}` names a class",
                        self.model.scope(target).qname(),
                        self.model.scope(id).qname()
                    );
                    continue;
                }
                self.model.add_include(
                    id,
                    Include {
                        module: target,
                        kind: include.kind,
                    },
                );
            }
        }
    }

    fn build_superclasses(&mut self) {
        for id in self.model.scope_ids() {
            if !self.model.scope(id).is_class() {
                continue;
            }
            let parents: Vec<String> = self
                .model
                .scope(id)
                .defs()
                .iter()
                .filter_map(|def| def.superclass_name().map(str::to_owned))
                .collect();
            if parents.is_empty() {
                continue;
            }
            // Two sites naming a superclass conflict even when the names
            // agree; the class keeps no superclass at all.
            if parents.len() > 1 {
                warn!(
                    "multiple parents for class `{}`",
                    self.model.scope(id).qname()
                );
                continue;
            }
            let Some(parent) = self.model.lookup_scope(&parents[0], Some(id)) else {
                // Unresolved superclasses stay silent.
                continue;
            };
            if !self.model.scope(parent).is_class() {
                warn!(
                    "using module `{}` as superclass for `{}`",
                    self.model.scope(parent).qname(),
                    self.model.scope(id).qname()
                );
                continue;
            }
            self.model.set_superclass(id, parent);
        }
    }
}
