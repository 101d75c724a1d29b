//! Occurrence records: one immutable entry per physical declaration site.
//!
//! Entities in the model merge every declaration of a qualified name into a
//! single object; occurrence records are what keep the individual sites
//! apart. They are appended while a file is processed and never mutated or
//! deleted afterwards.

use crate::entities::ScopeId;
use crate::location::Location;
use smallvec::SmallVec;

/// Mixin flavors supported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    Include,
    Prepend,
    Extend,
}

impl IncludeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncludeKind::Include => "include",
            IncludeKind::Prepend => "prepend",
            IncludeKind::Extend => "extend",
        }
    }
}

/// Attribute flavors (`attr_reader` / `attr_writer` / `attr_accessor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Reader,
    Writer,
    Accessor,
}

impl AttrKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttrKind::Reader => "attr_reader",
            AttrKind::Writer => "attr_writer",
            AttrKind::Accessor => "attr_accessor",
        }
    }
}

/// Marker recorded from a standalone signature annotation; it attaches to
/// the next property occurrence created in the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sig {
    pub loc: Location,
}

/// One positional method parameter name. All parameter flavors (required,
/// optional, rest, keyword, block) collapse to their identifying name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub type Params = SmallVec<[Param; 4]>;

/// Unresolved mixin reference exactly as written at one declaration site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDef {
    pub name: String,
    pub kind: IncludeKind,
}

/// Resolved mixin edge, created only by the global resolution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Include {
    pub module: ScopeId,
    pub kind: IncludeKind,
}

/// One physical declaration (or reopening) site of a scope.
#[derive(Debug)]
pub struct ScopeDef {
    loc: Location,
    superclass_name: Option<String>,
    includes: SmallVec<[IncludeDef; 2]>,
}

impl ScopeDef {
    pub(crate) fn new(loc: Location, superclass_name: Option<String>) -> Self {
        Self {
            loc,
            superclass_name,
            includes: SmallVec::new(),
        }
    }

    pub fn loc(&self) -> &Location {
        &self.loc
    }

    /// Raw superclass name as written at this site, for class declarations
    /// with a superclass expression. Resolution happens in the global phase.
    pub fn superclass_name(&self) -> Option<&str> {
        self.superclass_name.as_deref()
    }

    /// Unresolved mixin targets recorded while this site was open.
    pub fn includes(&self) -> &[IncludeDef] {
        &self.includes
    }

    pub(crate) fn push_include(&mut self, include: IncludeDef) {
        self.includes.push(include);
    }
}

/// One physical declaration site of a property.
#[derive(Debug)]
pub enum PropertyDef {
    Attr {
        loc: Location,
        kind: AttrKind,
        sig: Option<Sig>,
    },
    Const {
        loc: Location,
    },
    Method {
        loc: Location,
        is_singleton: bool,
        params: Params,
        sig: Option<Sig>,
    },
}

impl PropertyDef {
    pub fn loc(&self) -> &Location {
        match self {
            PropertyDef::Attr { loc, .. }
            | PropertyDef::Const { loc }
            | PropertyDef::Method { loc, .. } => loc,
        }
    }

    pub fn sig(&self) -> Option<&Sig> {
        match self {
            PropertyDef::Attr { sig, .. } | PropertyDef::Method { sig, .. } => sig.as_ref(),
            PropertyDef::Const { .. } => None,
        }
    }
}
