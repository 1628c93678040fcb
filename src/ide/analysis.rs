//! AnalysisHost and Analysis: the session context for IDE features.
//!
//! The `AnalysisHost` owns the workspace index, the re-index scheduler and
//! the document reconciler. There is no global index: dropping the host
//! tears the session down.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::new().with_indexer(Arc::new(MyBeanIndexer));
//!
//! // On every document change
//! host.reindex(&DocumentChange::new("app", uri, version, text.clone()));
//! let report = host.reconcile(&text, &mut diagnostics, &cancel);
//!
//! // Read queries work on a snapshot
//! let analysis = host.analysis();
//! let outline = analysis.document_symbols(uri);
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::scheduler::{IndexError, IndexScheduler, IndexTicket};
use super::symbols::{document_symbols, name_matches, project_symbols, workspace_symbols};
use crate::collect::Collector;
use crate::index::{
    DocumentElement, DocumentSymbol, IndexElement, ProjectElement, WorkspaceIndex, WorkspaceSymbol,
};
use crate::reconcile::{DocumentReconcileReport, DocumentReconciler, Problem, ValidationSettings};

/// One observed version of a document
#[derive(Debug, Clone)]
pub struct DocumentChange {
    pub project: SmolStr,
    pub uri: SmolStr,
    pub version: u64,
    pub text: Arc<str>,
}

impl DocumentChange {
    pub fn new(
        project: impl Into<SmolStr>,
        uri: impl Into<SmolStr>,
        version: u64,
        text: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            project: project.into(),
            uri: uri.into(),
            version,
            text: text.into(),
        }
    }
}

/// Discovers index elements in a document (beans, listeners, endpoints...)
pub trait DocumentIndexer: Send + Sync {
    fn name(&self) -> &str;

    /// Elements of `change`, in document order
    fn index(&self, change: &DocumentChange, cancel: &CancellationToken) -> Vec<IndexElement>;
}

/// What happened to one re-index request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The document was replaced; `elements` top-level elements were indexed
    Applied { elements: usize },
    /// Newer work for the document started first
    Superseded,
    /// Newer work, a close or a project removal cancelled this request
    Cancelled,
}

/// Owns all mutable state for the IDE layer.
pub struct AnalysisHost {
    index: Arc<WorkspaceIndex>,
    scheduler: IndexScheduler,
    reconciler: DocumentReconciler,
    indexers: Vec<Arc<dyn DocumentIndexer>>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self {
            index: Arc::new(WorkspaceIndex::new()),
            scheduler: IndexScheduler::new(),
            reconciler: DocumentReconciler::default(),
            indexers: Vec::new(),
        }
    }

    pub fn with_indexer(mut self, indexer: Arc<dyn DocumentIndexer>) -> Self {
        self.indexers.push(indexer);
        self
    }

    pub fn with_reconciler(mut self, reconciler: DocumentReconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    pub fn index(&self) -> &Arc<WorkspaceIndex> {
        &self.index
    }

    pub fn scheduler(&self) -> &IndexScheduler {
        &self.scheduler
    }

    // =========================================================================
    // Indexing
    // =========================================================================

    /// Rebuild the document of `change` and swap it into its project
    pub fn reindex(&self, change: &DocumentChange) -> IndexOutcome {
        let ticket = match self
            .scheduler
            .begin(&change.project, &change.uri, change.version)
        {
            Ok(ticket) => ticket,
            Err(error) => {
                debug!(%error, "re-index skipped");
                return IndexOutcome::Superseded;
            }
        };

        let Some(document) = self.build_document(change, &ticket) else {
            return IndexOutcome::Cancelled;
        };
        let elements = document.children().len();
        let document = Arc::new(document);

        match self.scheduler.commit(&ticket, || {
            self.index.update_document(&change.project, document)
        }) {
            Ok(_) => IndexOutcome::Applied { elements },
            Err(IndexError::Superseded { .. }) => IndexOutcome::Superseded,
            Err(IndexError::Cancelled { .. }) => IndexOutcome::Cancelled,
        }
    }

    fn build_document(
        &self,
        change: &DocumentChange,
        ticket: &IndexTicket,
    ) -> Option<DocumentElement> {
        let mut children = Vec::new();
        for indexer in &self.indexers {
            if ticket.is_cancelled() {
                debug!(uri = %change.uri, version = change.version, "re-index cancelled");
                return None;
            }
            children.extend(indexer.index(change, ticket.cancel_token()));
        }
        Some(DocumentElement::new(change.uri.clone()).with_children(children))
    }

    /// Re-index independent documents in parallel
    pub fn reindex_all(&self, changes: &[DocumentChange]) -> Vec<IndexOutcome> {
        changes.par_iter().map(|change| self.reindex(change)).collect()
    }

    /// Remove a closed or deleted document
    pub fn close_document(&self, project: &str, uri: &str) -> bool {
        self.scheduler.forget(uri);
        self.index.remove_document(project, uri).is_some()
    }

    /// Unload a project with all its documents
    ///
    /// In-flight re-indexing for the project is cancelled and can no longer
    /// bring the project back.
    pub fn remove_project(&self, name: &str) -> bool {
        self.scheduler
            .forget_project(name, || self.index.remove_project(name))
            .is_some()
    }

    // =========================================================================
    // Reconciling
    // =========================================================================

    pub fn apply_settings(&self, settings: ValidationSettings) {
        self.reconciler.apply_settings(settings);
    }

    pub fn reconcile(
        &self,
        text: &str,
        collector: &mut dyn Collector<Problem>,
        cancel: &CancellationToken,
    ) -> DocumentReconcileReport {
        self.reconciler.reconcile(text, collector, cancel)
    }

    pub fn reconciler(&self) -> &DocumentReconciler {
        &self.reconciler
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// A consistent read-only view of the index as it is now
    pub fn analysis(&self) -> Analysis {
        Analysis {
            projects: self
                .index
                .projects()
                .iter()
                .map(|project| Arc::new(project.snapshot()))
                .collect(),
        }
    }
}

/// Snapshot of the index for read queries
///
/// Holds the documents present when it was taken; later re-indexing does
/// not show through.
pub struct Analysis {
    projects: Vec<Arc<ProjectElement>>,
}

impl Analysis {
    pub fn projects(&self) -> &[Arc<ProjectElement>] {
        &self.projects
    }

    pub fn project(&self, name: &str) -> Option<&Arc<ProjectElement>> {
        self.projects.iter().find(|p| p.name() == name)
    }

    /// Outline of the document `uri`, whichever project holds it
    pub fn document_symbols(&self, uri: &str) -> Vec<DocumentSymbol> {
        self.projects
            .iter()
            .find_map(|project| project.document(uri))
            .map(|document| document_symbols(&document))
            .unwrap_or_default()
    }

    pub fn project_symbols(&self, name: &str) -> Vec<DocumentSymbol> {
        self.project(name).map(|p| project_symbols(p)).unwrap_or_default()
    }

    /// Symbols whose name contains `query`, optionally limited to one project
    pub fn workspace_symbols(&self, query: &str, project: Option<&str>) -> Vec<WorkspaceSymbol> {
        let projects: Vec<Arc<ProjectElement>> = match project {
            Some(name) => self.project(name).cloned().into_iter().collect(),
            None => self.projects.clone(),
        };
        workspace_symbols(&projects, |_| true, name_matches(query))
    }

    /// Symbols of the documents whose URI starts with `prefix`
    pub fn symbols_under(&self, prefix: &str, query: &str) -> Vec<WorkspaceSymbol> {
        workspace_symbols(
            &self.projects,
            |document| document.uri().starts_with(prefix),
            name_matches(query),
        )
    }
}
