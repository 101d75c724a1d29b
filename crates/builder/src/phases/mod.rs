//! The two model-building phases.
//!
//! [`BuildScopes`] runs once per file and only appends to the shared model;
//! [`BuildInheritance`] runs once per program, after the last file, and
//! writes the resolved mixin and superclass edges. The split is what makes
//! cross-file reopening order-independent: nothing is resolved until the
//! model is complete.

mod build_inheritance;
mod build_scopes;

pub use build_inheritance::BuildInheritance;
pub use build_scopes::BuildScopes;
