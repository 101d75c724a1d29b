//! Counting surfaces over a finished model: recursive per-scope metrics for
//! the console and whole-model totals serializable as JSON.

use crate::entities::{PropertyKind, ScopeId};
use crate::model::Model;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Recursive counts below one scope. Nested scopes are counted strictly
/// below the starting scope; attributes and methods include the starting
/// scope's own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeCounts {
    pub modules: usize,
    pub classes: usize,
    pub attrs: usize,
    pub methods: usize,
    pub sigs: usize,
}

pub fn count_scope(model: &Model, id: ScopeId) -> ScopeCounts {
    let scope = model.scope(id);
    let mut counts = ScopeCounts {
        attrs: scope.attrs().len(),
        methods: scope.methods().len(),
        sigs: count_sigs(model, id),
        ..ScopeCounts::default()
    };
    for &child in scope.children() {
        if model.scope(child).is_module() {
            counts.modules += 1;
        } else {
            counts.classes += 1;
        }
        let nested = count_scope(model, child);
        counts.modules += nested.modules;
        counts.classes += nested.classes;
        counts.attrs += nested.attrs;
        counts.methods += nested.methods;
        counts.sigs += nested.sigs;
    }
    counts
}

// A property counts as signed when any of its occurrences carries a marker.
fn count_sigs(model: &Model, id: ScopeId) -> usize {
    let scope = model.scope(id);
    scope
        .attrs()
        .iter()
        .chain(scope.methods())
        .filter(|&&property| {
            model
                .property(property)
                .defs()
                .iter()
                .any(|def| def.sig().is_some())
        })
        .count()
}

pub fn show_metrics(model: &Model, id: ScopeId, out: &mut impl Write) -> io::Result<()> {
    let counts = count_scope(model, id);
    writeln!(out, "Metrics for {}:", model.scope(id).qname())?;
    writeln!(out, " * Modules: {}", counts.modules)?;
    writeln!(out, " * Classes: {}", counts.classes)?;
    writeln!(out, " * Attributes: {}", counts.attrs)?;
    writeln!(out, " * Methods: {}", counts.methods)?;
    writeln!(out, " * Signatures: {}", counts.sigs)
}

/// Whole-model totals, exportable as JSON from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatistics {
    pub modules: usize,
    pub classes: usize,
    pub consts: usize,
    pub attrs: usize,
    pub methods: usize,
    pub scope_defs: usize,
    pub property_defs: usize,
    pub sigs: usize,
}

impl ModelStatistics {
    pub fn collect(model: &Model) -> Self {
        let mut stats = ModelStatistics::default();
        for scope in model.scopes() {
            if !scope.is_root() {
                if scope.is_module() {
                    stats.modules += 1;
                } else {
                    stats.classes += 1;
                }
            }
            stats.scope_defs += scope.defs().len();
        }
        for property in model.properties() {
            match property.kind() {
                PropertyKind::Attr { .. } => stats.attrs += 1,
                PropertyKind::Const => stats.consts += 1,
                PropertyKind::Method { .. } => stats.methods += 1,
            }
            stats.property_defs += property.defs().len();
            if property.defs().iter().any(|def| def.sig().is_some()) {
                stats.sigs += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{AttrKind, PropertyDef, Sig};
    use crate::location::Location;
    use smallvec::smallvec;

    fn sample_model() -> Model {
        let mut model = Model::new();
        let a = model.get_or_create_module(model.root(), "A");
        model.add_scope_def(a, Location::default(), None);
        let b = model.get_or_create_class(a, "B");
        model.add_scope_def(b, Location::default(), None);
        model.add_scope_def(b, Location::default(), None);
        let attr = model.get_or_create_attr(b, "name", AttrKind::Accessor);
        model.add_property_def(
            attr,
            PropertyDef::Attr {
                loc: Location::default(),
                kind: AttrKind::Accessor,
                sig: Some(Sig {
                    loc: Location::default(),
                }),
            },
        );
        let meth = model.get_or_create_method(b, "save", false);
        model.add_property_def(
            meth,
            PropertyDef::Method {
                loc: Location::default(),
                is_singleton: false,
                params: smallvec![],
                sig: None,
            },
        );
        let konst = model.get_or_create_const(a, "VERSION");
        model.add_property_def(konst, PropertyDef::Const { loc: Location::default() });
        model
    }

    #[test]
    fn test_count_scope_from_root() {
        let model = sample_model();
        let counts = count_scope(&model, model.root());
        assert_eq!(
            counts,
            ScopeCounts {
                modules: 1,
                classes: 1,
                attrs: 1,
                methods: 1,
                sigs: 1,
            }
        );
    }

    #[test]
    fn test_show_metrics_output() {
        let model = sample_model();
        let mut out = Vec::new();
        show_metrics(&model, model.root(), &mut out).unwrap();
        let expected = "\
Metrics for <root>:
 * Modules: 1
 * Classes: 1
 * Attributes: 1
 * Methods: 1
 * Signatures: 1
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_statistics_totals_and_json() {
        let model = sample_model();
        let stats = ModelStatistics::collect(&model);
        assert_eq!(
            stats,
            ModelStatistics {
                modules: 1,
                classes: 1,
                consts: 1,
                attrs: 1,
                methods: 1,
                scope_defs: 3,
                property_defs: 3,
                sigs: 1,
            }
        );
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"modules\":1"));
    }
}
