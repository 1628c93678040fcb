//! Reconciler faults and the fail-open outcome reported at the boundary

use thiserror::Error;

use crate::syntax::ParseError;

/// Internal faults of a reconcile run
///
/// These never escape [`Reconciler::reconcile`](super::Reconciler::reconcile);
/// they surface as [`ReconcileOutcome`] values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("reconciliation was cancelled")]
    Cancelled,

    #[error("nesting exceeds {0} levels")]
    NestingTooDeep(usize),

    #[error("embedded languages nested deeper than {0} levels")]
    EmbeddingTooDeep(usize),

    #[error("region of {len} bytes exceeds the limit of {limit} bytes")]
    RegionTooLarge { len: usize, limit: usize },
}

impl From<ParseError> for ReconcileError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Cancelled => ReconcileError::Cancelled,
            ParseError::NestingTooDeep(depth) => ReconcileError::NestingTooDeep(depth),
        }
    }
}

/// What a reconcile invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Ran to completion and published `reported` problems
    Completed { reported: usize },
    /// The reconciler is switched off; nothing was looked at
    Disabled,
    /// Cancelled; only batches flushed by earlier checkpoints were published
    Cancelled,
    /// An internal fault was masked; nothing from this invocation was published
    Faulted(ReconcileError),
}

impl ReconcileOutcome {
    /// Problems published by this invocation
    pub fn reported(&self) -> usize {
        match self {
            ReconcileOutcome::Completed { reported } => *reported,
            _ => 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ReconcileOutcome::Completed { .. })
    }
}
