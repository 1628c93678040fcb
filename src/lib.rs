//! # bootls-base
//!
//! Core library for Spring Boot language tooling: the semantic index of
//! framework elements, validation of the languages embedded in annotations,
//! and query reformatting.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost, re-index scheduling, symbol queries
//!   ↓
//! index     → Workspace / project / document element tree
//!   ↓
//! format    → JPQL and JSON query reformatting
//!   ↓
//! reconcile → Embedded-language reconcilers, sessions, problems
//!   ↓
//! syntax    → Logos lexers and rowan parsers (cron, SpEL, JPQL, placeholders)
//!   ↓
//! collect   → Collector protocol
//!   ↓
//! base      → Primitives (TextRange, LineIndex, Position, Span)
//! ```

// ============================================================================
// MODULES (dependency order: base → collect → syntax → reconcile → format → index → ide)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Position, Span
pub mod base;

/// Collectors: begin / accept / checkpoint / end sinks for findings
pub mod collect;

/// Syntax: lexers and parsers for the embedded languages
pub mod syntax;

/// Reconciliation: embedded-language validation into positioned problems
pub mod reconcile;

/// Query reformatting for annotation values
pub mod format;

/// The semantic index tree
pub mod index;

/// IDE features: analysis host, symbol queries
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};
