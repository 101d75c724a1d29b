//! Entities: scopes (modules/classes) and properties (attributes, constants,
//! methods), each identified by a globally unique qualified name.
//!
//! Entities live in arenas owned by [`Model`](crate::model::Model) and refer
//! to each other through plain handles ([`ScopeId`], [`PropertyId`]). The
//! parent/child/superclass/include graph is cyclic by nature (a reopened
//! namespace is reachable from many places), so nothing here owns anything
//! else.

use crate::defs::{Include, PropertyDef, ScopeDef};
use smallvec::SmallVec;
use std::fmt;

/// Handle to a scope in the model's arena. Handles are dense and reflect
/// registration order: a lower id was registered earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) u32);

/// Handle to a property in the model's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyId(pub(crate) u32);

/// Identifies one declaration site of a scope: the owning scope plus the
/// index of the occurrence in its `defs` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeDefId {
    pub scope: ScopeId,
    pub(crate) index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Module,
    Class,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Module => "module",
            ScopeKind::Class => "class",
        }
    }
}

/// A module or class. One `Scope` exists per qualified name no matter how
/// many files reopen it; each physical site is a [`ScopeDef`] entry.
#[derive(Debug)]
pub struct Scope {
    pub(crate) id: ScopeId,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) name: String,
    pub(crate) qname: String,
    pub(crate) kind: ScopeKind,
    pub(crate) children: Vec<ScopeId>,
    pub(crate) defs: Vec<ScopeDef>,
    pub(crate) includes: SmallVec<[Include; 4]>,
    pub(crate) consts: Vec<PropertyId>,
    pub(crate) methods: Vec<PropertyId>,
    // Class-only state. Stays empty/unset for modules.
    pub(crate) attrs: Vec<PropertyId>,
    pub(crate) superclass: Option<ScopeId>,
}

impl Scope {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Lexically enclosing scope; `None` only for the root.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Simple name: the full declared segment, so `module A::B` yields the
    /// compound name `"A::B"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qname(&self) -> &str {
        &self.qname
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_module(&self) -> bool {
        matches!(self.kind, ScopeKind::Module)
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, ScopeKind::Class)
    }

    /// Scopes lexically nested directly inside this one, in discovery order.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// One entry per physical declaration site, in processing order.
    pub fn defs(&self) -> &[ScopeDef] {
        &self.defs
    }

    /// Resolved mixin edges. Empty until the global phase runs.
    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    pub fn consts(&self) -> &[PropertyId] {
        &self.consts
    }

    pub fn methods(&self) -> &[PropertyId] {
        &self.methods
    }

    /// Attribute properties; only classes carry attributes.
    pub fn attrs(&self) -> &[PropertyId] {
        &self.attrs
    }

    /// Resolved superclass. Absent until the global phase runs, and left
    /// absent when resolution fails or is ambiguous.
    pub fn superclass(&self) -> Option<ScopeId> {
        self.superclass
    }

    /// Qualified name of a scope named `name` declared directly under
    /// `parent`. The root carries a sentinel name outside the `::` grammar.
    pub fn qualify_name(parent: Option<&Scope>, name: &str) -> String {
        match parent {
            None => crate::model::ROOT_NAME.to_string(),
            Some(parent) if parent.is_root() => format!("::{name}"),
            Some(parent) => format!("{}::{}", parent.qname, name),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qname)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Attr { kind: crate::defs::AttrKind },
    Const,
    Method { is_singleton: bool },
}

/// An attribute, constant, or method declared directly in a scope. Like
/// scopes, one `Property` exists per qualified name; redefinitions append
/// [`PropertyDef`] entries.
#[derive(Debug)]
pub struct Property {
    pub(crate) id: PropertyId,
    pub(crate) scope: ScopeId,
    pub(crate) name: String,
    pub(crate) qname: String,
    pub(crate) kind: PropertyKind,
    pub(crate) defs: Vec<PropertyDef>,
}

impl Property {
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Owning scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qname(&self) -> &str {
        &self.qname
    }

    /// Kind recorded when the property was first encountered. Later sites
    /// may disagree (an `attr_reader` reopened as `attr_writer`); their own
    /// kind lives on the occurrence record.
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn defs(&self) -> &[PropertyDef] {
        &self.defs
    }

    /// `{scope}@{name}`
    pub fn qualify_attr(scope_qname: &str, name: &str) -> String {
        format!("{scope_qname}@{name}")
    }

    /// `{scope}::{name}`
    pub fn qualify_const(scope_qname: &str, name: &str) -> String {
        format!("{scope_qname}::{name}")
    }

    /// `{scope}#{name}` for instance methods, `{scope}::{name}` for
    /// singleton methods.
    pub fn qualify_method(scope_qname: &str, name: &str, is_singleton: bool) -> String {
        let label = if is_singleton { "::" } else { "#" };
        format!("{scope_qname}{label}{name}")
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qname)
    }
}
