//! The shared symbol model: qname-keyed arenas of scopes and properties.
//!
//! A [`Model`] is created once per run, populated in place by the per-file
//! scope-building pass, then completed by the global resolution pass.
//! Registration is idempotent: asking for an already-known qualified name
//! always returns the existing entity, which is what merges reopened
//! namespaces across files into a single object. Downstream consumers only
//! read.

use crate::defs::{AttrKind, Include, IncludeDef, PropertyDef, ScopeDef};
use crate::entities::{
    Property, PropertyId, PropertyKind, Scope, ScopeDefId, ScopeId, ScopeKind,
};
use crate::location::Location;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Sentinel name and qualified name of the root scope.
pub const ROOT_NAME: &str = "<root>";

#[derive(Debug)]
pub struct Model {
    scopes: Vec<Scope>,
    properties: Vec<Property>,
    scopes_by_qname: FxHashMap<String, ScopeId>,
    properties_by_qname: FxHashMap<String, PropertyId>,
    root: ScopeId,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        let mut model = Self {
            scopes: Vec::new(),
            properties: Vec::new(),
            scopes_by_qname: FxHashMap::default(),
            properties_by_qname: FxHashMap::default(),
            root: ScopeId(0),
        };
        model.root = model.insert_scope(None, ROOT_NAME, ROOT_NAME.to_string(), ScopeKind::Module);
        model
    }

    /// The synthetic module every top-level declaration hangs off.
    pub fn root(&self) -> ScopeId {
        self.root
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn property(&self, id: PropertyId) -> &Property {
        &self.properties[id.0 as usize]
    }

    /// All scopes in registration order.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// All properties in registration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    pub fn modules(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter().filter(|scope| scope.is_module())
    }

    pub fn classes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter().filter(|scope| scope.is_class())
    }

    pub fn scope_ids(&self) -> Vec<ScopeId> {
        (0..self.scopes.len() as u32).map(ScopeId).collect()
    }

    pub fn scope_by_qname(&self, qname: &str) -> Option<ScopeId> {
        self.scopes_by_qname.get(qname).copied()
    }

    pub fn property_by_qname(&self, qname: &str) -> Option<PropertyId> {
        self.properties_by_qname.get(qname).copied()
    }

    /// Maps a textual scope reference to a scope, if any.
    ///
    /// A name in fully-qualified form (leading `::`) resolves by exact qname
    /// match and nothing else. Any other name resolves to the first
    /// registered scope whose simple name matches, wherever it lives.
    // TODO: semi-qualified lookup — walk `context`'s ancestors and nested
    // children before falling back to the global scan.
    pub fn lookup_scope(&self, name: &str, context: Option<ScopeId>) -> Option<ScopeId> {
        if name.starts_with("::") {
            return self.scopes_by_qname.get(name).copied();
        }
        let _ = context;
        self.scopes
            .iter()
            .find(|scope| scope.name == name)
            .map(|scope| scope.id)
    }

    /// Returns the module or class named `name` directly under `parent`,
    /// registering it first if this is the first time the qualified name is
    /// seen. The kind only matters on first registration; a later
    /// declaration of the same qname under a different kind still merges
    /// into the existing entity.
    pub fn get_or_create_scope(&mut self, parent: ScopeId, name: &str, kind: ScopeKind) -> ScopeId {
        let qname = Scope::qualify_name(Some(self.scope(parent)), name);
        if let Some(&id) = self.scopes_by_qname.get(&qname) {
            return id;
        }
        self.insert_scope(Some(parent), name, qname, kind)
    }

    pub fn get_or_create_module(&mut self, parent: ScopeId, name: &str) -> ScopeId {
        self.get_or_create_scope(parent, name, ScopeKind::Module)
    }

    pub fn get_or_create_class(&mut self, parent: ScopeId, name: &str) -> ScopeId {
        self.get_or_create_scope(parent, name, ScopeKind::Class)
    }

    pub fn get_or_create_attr(&mut self, scope: ScopeId, name: &str, kind: AttrKind) -> PropertyId {
        let qname = Property::qualify_attr(self.scope(scope).qname(), name);
        if let Some(&id) = self.properties_by_qname.get(&qname) {
            return id;
        }
        let id = self.insert_property(scope, name, qname, PropertyKind::Attr { kind });
        self.scopes[scope.0 as usize].attrs.push(id);
        id
    }

    pub fn get_or_create_const(&mut self, scope: ScopeId, name: &str) -> PropertyId {
        let qname = Property::qualify_const(self.scope(scope).qname(), name);
        if let Some(&id) = self.properties_by_qname.get(&qname) {
            return id;
        }
        let id = self.insert_property(scope, name, qname, PropertyKind::Const);
        self.scopes[scope.0 as usize].consts.push(id);
        id
    }

    pub fn get_or_create_method(
        &mut self,
        scope: ScopeId,
        name: &str,
        is_singleton: bool,
    ) -> PropertyId {
        let qname = Property::qualify_method(self.scope(scope).qname(), name, is_singleton);
        if let Some(&id) = self.properties_by_qname.get(&qname) {
            return id;
        }
        let id = self.insert_property(scope, name, qname, PropertyKind::Method { is_singleton });
        self.scopes[scope.0 as usize].methods.push(id);
        id
    }

    /// Appends one declaration-site record to a scope.
    pub fn add_scope_def(
        &mut self,
        scope: ScopeId,
        loc: Location,
        superclass_name: Option<String>,
    ) -> ScopeDefId {
        let defs = &mut self.scopes[scope.0 as usize].defs;
        defs.push(ScopeDef::new(loc, superclass_name));
        ScopeDefId {
            scope,
            index: (defs.len() - 1) as u32,
        }
    }

    /// Records an unresolved mixin reference on one declaration site.
    pub fn add_include_def(&mut self, def: ScopeDefId, include: IncludeDef) {
        self.scopes[def.scope.0 as usize].defs[def.index as usize].push_include(include);
    }

    /// Appends one declaration-site record to a property.
    pub fn add_property_def(&mut self, property: PropertyId, def: PropertyDef) {
        self.properties[property.0 as usize].defs.push(def);
    }

    /// Records a resolved mixin edge. Written only by the global phase.
    pub fn add_include(&mut self, scope: ScopeId, include: Include) {
        self.scopes[scope.0 as usize].includes.push(include);
    }

    /// Records a resolved superclass. Written at most once per class, by the
    /// global phase.
    pub fn set_superclass(&mut self, class: ScopeId, superclass: ScopeId) {
        self.scopes[class.0 as usize].superclass = Some(superclass);
    }

    fn insert_scope(
        &mut self,
        parent: Option<ScopeId>,
        name: &str,
        qname: String,
        kind: ScopeKind,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            parent,
            name: name.to_string(),
            qname: qname.clone(),
            kind,
            children: Vec::new(),
            defs: Vec::new(),
            includes: SmallVec::new(),
            consts: Vec::new(),
            methods: Vec::new(),
            attrs: Vec::new(),
            superclass: None,
        });
        self.scopes_by_qname.insert(qname, id);
        if let Some(parent) = parent {
            self.scopes[parent.0 as usize].children.push(id);
        }
        id
    }

    fn insert_property(
        &mut self,
        scope: ScopeId,
        name: &str,
        qname: String,
        kind: PropertyKind,
    ) -> PropertyId {
        let id = PropertyId(self.properties.len() as u32);
        self.properties.push(Property {
            id,
            scope,
            name: name.to_string(),
            qname: qname.clone(),
            kind,
            defs: Vec::new(),
        });
        self.properties_by_qname.insert(qname, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::IncludeKind;

    #[test]
    fn test_root_scope() {
        let model = Model::new();
        let root = model.scope(model.root());
        assert!(root.is_root());
        assert!(root.is_module());
        assert_eq!(root.qname(), "<root>");
        assert_eq!(model.scopes().count(), 1);
    }

    #[test]
    fn test_qualification() {
        let mut model = Model::new();
        let a = model.get_or_create_module(model.root(), "A");
        let b = model.get_or_create_class(a, "B");
        assert_eq!(model.scope(a).qname(), "::A");
        assert_eq!(model.scope(b).qname(), "::A::B");
        assert_eq!(model.scope(b).name(), "B");
        assert_eq!(model.scope(a).children(), &[b]);
    }

    #[test]
    fn test_compound_segment_keeps_its_declared_name() {
        let mut model = Model::new();
        let a = model.get_or_create_module(model.root(), "A");
        let bc = model.get_or_create_module(a, "B::C");
        assert_eq!(model.scope(bc).name(), "B::C");
        assert_eq!(model.scope(bc).qname(), "::A::B::C");
        assert_eq!(model.scope(bc).parent(), Some(a));
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut model = Model::new();
        let first = model.get_or_create_module(model.root(), "A");
        let again = model.get_or_create_module(model.root(), "A");
        assert_eq!(first, again);
        // A conflicting kind still merges into the existing entity.
        let as_class = model.get_or_create_class(model.root(), "A");
        assert_eq!(first, as_class);
        assert!(model.scope(as_class).is_module());
        assert_eq!(model.scopes().count(), 2);
        assert_eq!(model.scope(model.root()).children().len(), 1);
    }

    #[test]
    fn test_property_qualification() {
        let mut model = Model::new();
        let c = model.get_or_create_class(model.root(), "C");
        let attr = model.get_or_create_attr(c, "name", AttrKind::Reader);
        let konst = model.get_or_create_const(c, "VERSION");
        let imeth = model.get_or_create_method(c, "save", false);
        let smeth = model.get_or_create_method(c, "build", true);
        assert_eq!(model.property(attr).qname(), "::C@name");
        assert_eq!(model.property(konst).qname(), "::C::VERSION");
        assert_eq!(model.property(imeth).qname(), "::C#save");
        assert_eq!(model.property(smeth).qname(), "::C::build");
        assert_eq!(model.scope(c).attrs(), &[attr]);
        assert_eq!(model.scope(c).consts(), &[konst]);
        assert_eq!(model.scope(c).methods(), &[imeth, smeth]);
    }

    #[test]
    fn test_singleton_method_and_const_can_share_a_qname_slot() {
        // `::C::x` as a singleton method and `::C::X` as a const stay apart,
        // but a singleton method and a const with the same name collide on
        // qname and merge. That is the price of string identity.
        let mut model = Model::new();
        let c = model.get_or_create_class(model.root(), "C");
        let meth = model.get_or_create_method(c, "Version", true);
        let konst = model.get_or_create_const(c, "Version");
        assert_eq!(meth, konst);
    }

    #[test]
    fn test_lookup_fully_qualified_is_exact() {
        let mut model = Model::new();
        let a = model.get_or_create_module(model.root(), "A");
        let b = model.get_or_create_class(a, "B");
        assert_eq!(model.lookup_scope("::A::B", None), Some(b));
        assert_eq!(model.lookup_scope("::B", None), None);
        assert_eq!(model.lookup_scope("::Missing", None), None);
    }

    #[test]
    fn test_lookup_unqualified_scans_in_registration_order() {
        let mut model = Model::new();
        let a = model.get_or_create_module(model.root(), "A");
        let first_b = model.get_or_create_class(a, "B");
        let z = model.get_or_create_module(model.root(), "Z");
        let _second_b = model.get_or_create_class(z, "B");
        assert_eq!(model.lookup_scope("B", None), Some(first_b));
        // Context does not narrow the scan; the first registration wins
        // regardless of where the reference was written.
        assert_eq!(model.lookup_scope("B", Some(z)), Some(first_b));
    }

    #[test]
    fn test_occurrences_accumulate() {
        let mut model = Model::new();
        let a = model.get_or_create_class(model.root(), "A");
        model.add_scope_def(a, Location::default(), None);
        let def = model.add_scope_def(a, Location::default(), Some("Base".to_string()));
        model.add_include_def(
            def,
            IncludeDef {
                name: "M".to_string(),
                kind: IncludeKind::Include,
            },
        );
        let scope = model.scope(a);
        assert_eq!(scope.defs().len(), 2);
        assert_eq!(scope.defs()[0].superclass_name(), None);
        assert_eq!(scope.defs()[1].superclass_name(), Some("Base"));
        assert_eq!(scope.defs()[1].includes().len(), 1);
        assert!(scope.includes().is_empty());
    }
}
