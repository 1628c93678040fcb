//! The workspace: projects by name

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use smol_str::SmolStr;
use tracing::debug;

use super::{DocumentElement, IndexElement, ProjectElement};

/// All projects of a session, in discovery order
#[derive(Debug, Default)]
pub struct WorkspaceIndex {
    projects: RwLock<IndexMap<SmolStr, Arc<ProjectElement>>>,
}

impl WorkspaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self, name: &str) -> Option<Arc<ProjectElement>> {
        self.projects.read().get(name).cloned()
    }

    /// The project called `name`, created empty if it is not known yet
    pub fn project_or_insert(&self, name: &str) -> Arc<ProjectElement> {
        if let Some(project) = self.project(name) {
            return project;
        }
        self.projects
            .write()
            .entry(SmolStr::new(name))
            .or_insert_with(|| {
                debug!(project = name, "project added");
                Arc::new(ProjectElement::new(name))
            })
            .clone()
    }

    /// Drop a project and everything it owns
    pub fn remove_project(&self, name: &str) -> Option<Arc<ProjectElement>> {
        let removed = self.projects.write().shift_remove(name);
        if removed.is_some() {
            debug!(project = name, "project removed");
        }
        removed
    }

    pub fn projects(&self) -> Vec<Arc<ProjectElement>> {
        self.projects.read().values().cloned().collect()
    }

    pub fn project_names(&self) -> Vec<SmolStr> {
        self.projects.read().keys().cloned().collect()
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// Insert or replace `document` in `project`
    pub fn update_document(
        &self,
        project: &str,
        document: Arc<DocumentElement>,
    ) -> Option<Arc<DocumentElement>> {
        self.project_or_insert(project).replace_document(document)
    }

    pub fn remove_document(&self, project: &str, uri: &str) -> Option<Arc<DocumentElement>> {
        self.project(project)?.remove_document(uri)
    }

    pub fn document(&self, project: &str, uri: &str) -> Option<Arc<DocumentElement>> {
        self.project(project)?.document(uri)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Depth-first matches in one project; empty for unknown projects
    pub fn nodes_matching<F>(&self, project: &str, predicate: F) -> Vec<Arc<IndexElement>>
    where
        F: Fn(&IndexElement) -> bool,
    {
        self.project(project)
            .map(|p| p.nodes_matching(predicate))
            .unwrap_or_default()
    }

    pub fn beans_of_project(&self, project: &str) -> Vec<Arc<IndexElement>> {
        self.nodes_matching(project, |e| e.as_bean().is_some())
    }

    pub fn beans_with_name(&self, project: &str, name: &str) -> Vec<Arc<IndexElement>> {
        self.nodes_matching(project, |e| e.as_bean().is_some_and(|b| b.name == name))
    }

    /// Beans injectable where `type_name` is expected
    pub fn beans_of_type(&self, project: &str, type_name: &str) -> Vec<Arc<IndexElement>> {
        self.nodes_matching(project, |e| {
            e.as_bean()
                .is_some_and(|b| b.is_type_compatible_with(type_name))
        })
    }

    /// Beans of the document `uri`, in whichever project holds it
    pub fn beans_of_document(&self, uri: &str) -> Vec<Arc<IndexElement>> {
        self.projects()
            .iter()
            .find_map(|project| project.document(uri))
            .map(|document| document.nodes_matching(|e| e.as_bean().is_some()))
            .unwrap_or_default()
    }
}
