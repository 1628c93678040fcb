//! Whole-document reconciliation
//!
//! Locates embedded regions, reconciles each with the reconciler for its
//! language, and drives one collector through begin, optional per-region
//! checkpoints, and end.

use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{
    AnnotationRegionLocator, Problem, ReconcileError, ReconcileOutcome, ReconcileSession,
    Reconcilers, RegionLocator, ValidationSettings,
};
use crate::collect::Collector;

/// Summary of one document run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReconcileReport {
    pub outcome: ReconcileOutcome,
    /// Regions found in the document
    pub regions: usize,
    /// Regions whose findings were dropped because of an internal fault
    pub faulted_regions: usize,
}

/// Problems of one document from a batch run
#[derive(Debug, Clone)]
pub struct DocumentProblems {
    pub uri: SmolStr,
    pub problems: Vec<Problem>,
    pub report: DocumentReconcileReport,
}

pub struct DocumentReconciler {
    reconcilers: Reconcilers,
    locator: Arc<dyn RegionLocator>,
    settings: RwLock<ValidationSettings>,
}

impl DocumentReconciler {
    pub fn new(reconcilers: Reconcilers, locator: Arc<dyn RegionLocator>) -> Self {
        Self {
            reconcilers,
            locator,
            settings: RwLock::new(ValidationSettings::default()),
        }
    }

    pub fn reconcilers(&self) -> &Reconcilers {
        &self.reconcilers
    }

    pub fn settings(&self) -> ValidationSettings {
        self.settings.read().clone()
    }

    /// Replace the settings and toggle the live reconcilers to match
    pub fn apply_settings(&self, settings: ValidationSettings) {
        self.reconcilers.apply(&settings);
        *self.settings.write() = settings;
    }

    /// Reconcile every region of `source` into `collector`
    pub fn reconcile(
        &self,
        source: &str,
        collector: &mut dyn Collector<Problem>,
        cancel: &CancellationToken,
    ) -> DocumentReconcileReport {
        let settings = self.settings();
        let regions = self.locator.locate(source);
        debug!(regions = regions.len(), "reconciling document");

        collector.begin_collecting();
        let mut session = ReconcileSession::new(&mut *collector, cancel)
            .with_limits(settings.max_embedding_depth, settings.max_region_len);
        let mut faulted_regions = 0;
        let mut cancelled = false;

        for region in &regions {
            let reconciler = self.reconcilers.get(region.language);
            if !reconciler.is_enabled() {
                continue;
            }
            let mark = session.mark();
            match reconciler.reconcile_in(region.text(source), region.offset(), &mut session) {
                Ok(()) => {
                    if settings.checkpoint_regions {
                        session.checkpoint();
                    }
                }
                Err(ReconcileError::Cancelled) => {
                    cancelled = true;
                    break;
                }
                Err(error) => {
                    session.rollback(mark);
                    faulted_regions += 1;
                    warn!(
                        language = %region.language,
                        offset = u32::from(region.offset()),
                        %error,
                        "region reconcile fault masked"
                    );
                }
            }
        }

        let outcome = if cancelled {
            let published = session.discard();
            debug!(published, "document reconcile cancelled");
            ReconcileOutcome::Cancelled
        } else {
            ReconcileOutcome::Completed {
                reported: session.commit(),
            }
        };
        collector.end_collecting();

        DocumentReconcileReport {
            outcome,
            regions: regions.len(),
            faulted_regions,
        }
    }

    /// Reconcile independent documents in parallel
    pub fn reconcile_all(
        &self,
        documents: &[(SmolStr, Arc<str>)],
        cancel: &CancellationToken,
    ) -> Vec<DocumentProblems> {
        documents
            .par_iter()
            .map(|(uri, text)| {
                let mut problems: Vec<Problem> = Vec::new();
                let report = self.reconcile(text, &mut problems, cancel);
                DocumentProblems {
                    uri: uri.clone(),
                    problems,
                    report,
                }
            })
            .collect()
    }
}

impl Default for DocumentReconciler {
    fn default() -> Self {
        Self::new(Reconcilers::new(), Arc::new(AnnotationRegionLocator))
    }
}
