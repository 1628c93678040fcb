//! The semantic index
//!
//! A strict ownership tree of discovered framework elements:
//!
//! ```text
//! WorkspaceIndex ─ project name → ProjectElement
//!                                   ├─ DocumentElement (one per URI)
//!                                   │    └─ IndexElement ─ IndexElement ...
//!                                   └─ IndexElement (project level)
//! ```
//!
//! Documents are copy-on-write: a re-index builds a new [`DocumentElement`]
//! off to the side and swaps it in with one write, so readers never see a
//! half-built document.

mod document;
mod element;
mod project;
mod symbol;
mod workspace;

#[cfg(test)]
mod tests;

pub use document::{DocumentElement, IndexNode, nodes_matching};
pub use element::{
    AnnotationMetadata, Bean, ElementId, ElementKind, EventListener, IndexElement, InjectionPoint,
    NamedInterface, RequestMapping, Stereotype, simple_type_name,
};
pub use project::ProjectElement;
pub use symbol::{DocumentSymbol, Location, SymbolKind, WorkspaceSymbol};
pub use workspace::WorkspaceIndex;
