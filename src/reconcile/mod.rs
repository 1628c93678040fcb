//! Reconciliation: validating embedded languages into positioned problems
//!
//! ```text
//! document ─ RegionLocator ─→ regions ─ Reconciler ─→ Problems ─→ Collector
//!                                          │
//!                                          └─ embedded token ─→ nested Reconciler
//! ```
//!
//! Reconcilers are fail-open: cancellation and internal faults surface as a
//! [`ReconcileOutcome`], never as a panic or an error past the boundary.

mod document;
mod error;
mod grammar;
mod grammars;
mod problem;
mod regions;
mod session;
mod settings;

pub use document::{DocumentProblems, DocumentReconcileReport, DocumentReconciler};
pub use error::{ReconcileError, ReconcileOutcome};
pub use grammar::{EmbeddedGrammar, Grammar, GrammarReconciler, Reconciler};
pub use grammars::{
    CronGrammar, JpqlGrammar, PlaceholderGrammar, Reconcilers, SpelGrammar, cron_reconciler,
    jpql_reconciler, placeholder_reconciler, spel_reconciler,
};
pub use problem::{
    DefaultSeverityPolicy, Diagnostic, Problem, ProblemCategory, ProblemKind, Severity,
    SeverityPolicy,
};
pub use regions::{AnnotationRegionLocator, EmbeddedRegion, RegionLanguage, RegionLocator};
pub use session::{DEFAULT_MAX_EMBEDDING_DEPTH, DEFAULT_MAX_REGION_LEN, Mark, ReconcileSession};
pub use settings::ValidationSettings;

#[cfg(test)]
mod tests;
