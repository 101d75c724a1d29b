//! The cross-file symbol model for Ruby programs.
//!
//! Ruby namespaces are reopenable: the same fully-qualified name may be
//! declared in many places across many files, and every declaration
//! contributes to one logical entity. This crate holds the merged picture:
//!
//! - [`Model`] — arenas of [`Scope`]s (modules/classes) and [`Property`]s
//!   (attributes/constants/methods) keyed by qualified name, plus the
//!   deliberately naive [`Model::lookup_scope`] query.
//! - Occurrence records ([`ScopeDef`], [`PropertyDef`]) — one immutable
//!   entry per physical declaration site, so reopenings stay traceable to
//!   their sources.
//! - Read-only consumers: the [`printer`] and [`metrics`] surfaces.
//!
//! The model is populated by the `builder` crate's two phases and read by
//! everything else. Identity is the qualified name: the model never holds
//! two scope objects or two property objects with the same qname.

pub mod location;
pub mod metrics;
pub mod printer;

mod defs;
mod entities;
mod model;

pub use crate::defs::{
    AttrKind, Include, IncludeDef, IncludeKind, Param, Params, PropertyDef, ScopeDef, Sig,
};
pub use crate::entities::{
    Property, PropertyId, PropertyKind, Scope, ScopeDefId, ScopeId, ScopeKind,
};
pub use crate::location::{Location, Position, Span};
pub use crate::model::{Model, ROOT_NAME};
