//! One reconcile run over a collector
//!
//! Problems are buffered in the session and only reach the collector on
//! [`ReconcileSession::checkpoint`] or [`ReconcileSession::commit`], so a
//! cancelled or faulted run publishes nothing beyond earlier checkpoints.

use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{Problem, ReconcileError};
use crate::collect::Collector;

/// Default limit on embedded-language nesting (SpEL inside JPQL inside ...)
pub const DEFAULT_MAX_EMBEDDING_DEPTH: usize = 4;

/// Default limit on the size of one region
pub const DEFAULT_MAX_REGION_LEN: usize = 64 * 1024;

/// Marker for [`ReconcileSession::rollback`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(usize);

pub struct ReconcileSession<'a> {
    collector: &'a mut dyn Collector<Problem>,
    cancel: &'a CancellationToken,
    pending: Vec<Problem>,
    flushed: usize,
    depth: usize,
    max_depth: usize,
    max_region_len: usize,
}

impl<'a> ReconcileSession<'a> {
    pub fn new(collector: &'a mut dyn Collector<Problem>, cancel: &'a CancellationToken) -> Self {
        Self {
            collector,
            cancel,
            pending: Vec::new(),
            flushed: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_EMBEDDING_DEPTH,
            max_region_len: DEFAULT_MAX_REGION_LEN,
        }
    }

    pub fn with_limits(mut self, max_depth: usize, max_region_len: usize) -> Self {
        self.max_depth = max_depth;
        self.max_region_len = max_region_len;
        self
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        self.cancel
    }

    pub fn check_cancelled(&self) -> Result<(), ReconcileError> {
        if self.cancel.is_cancelled() {
            Err(ReconcileError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn check_region(&self, len: usize) -> Result<(), ReconcileError> {
        if len > self.max_region_len {
            return Err(ReconcileError::RegionTooLarge {
                len,
                limit: self.max_region_len,
            });
        }
        Ok(())
    }

    pub fn report(&mut self, problem: Problem) {
        trace!(%problem, "problem");
        self.pending.push(problem);
    }

    /// Problems buffered since the last checkpoint
    pub fn pending(&self) -> &[Problem] {
        &self.pending
    }

    // =========================================================================
    // Embedding
    // =========================================================================

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn enter_embedded(&mut self) -> Result<(), ReconcileError> {
        if self.depth >= self.max_depth {
            return Err(ReconcileError::EmbeddingTooDeep(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit_embedded(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pending.len())
    }

    /// Drop problems reported since `mark`
    pub fn rollback(&mut self, mark: Mark) {
        self.pending.truncate(mark.0);
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    fn flush(&mut self) -> usize {
        self.pending.sort();
        let count = self.pending.len();
        for problem in self.pending.drain(..) {
            self.collector.accept(problem);
        }
        self.flushed += count;
        count
    }

    /// Publish buffered problems as a partial batch
    pub fn checkpoint(&mut self) {
        self.flush();
        self.collector.checkpoint_collecting();
    }

    /// Publish what is left; returns everything this session published
    pub fn commit(mut self) -> usize {
        self.flush();
        self.flushed
    }

    /// Drop what is left; returns what earlier checkpoints published
    pub fn discard(self) -> usize {
        self.flushed
    }
}
