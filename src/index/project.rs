//! A project's ordered children

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::{DocumentElement, ElementId, IndexElement, IndexNode};

/// Children in order, with documents also keyed by URI
#[derive(Debug, Clone, Default)]
struct Children {
    nodes: IndexMap<ElementId, IndexNode>,
    documents: FxHashMap<SmolStr, ElementId>,
}

impl Children {
    fn take_document(&mut self, uri: &str) -> Option<Arc<DocumentElement>> {
        let id = self.documents.remove(uri)?;
        match self.nodes.shift_remove(&id)? {
            IndexNode::Document(document) => Some(document),
            IndexNode::Element(_) => None,
        }
    }

    fn document(&self, uri: &str) -> Option<&Arc<DocumentElement>> {
        let id = self.documents.get(uri)?;
        self.nodes.get(id)?.as_document()
    }
}

/// One project of the workspace
///
/// Owns an ordered sequence of documents and other elements. At most one
/// document per URI is present: adding a document first removes the one
/// with the same URI. All mutation goes through one lock, so changes to a
/// project are linearizable; readers work on snapshots.
#[derive(Debug)]
pub struct ProjectElement {
    name: SmolStr,
    children: RwLock<Children>,
}

impl ProjectElement {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            children: RwLock::new(Children::default()),
        }
    }

    /// A detached copy holding the current children
    ///
    /// Taken under one read lock; later changes to either project do not
    /// show in the other.
    pub fn snapshot(&self) -> Self {
        Self {
            name: self.name.clone(),
            children: RwLock::new(self.children.read().clone()),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    /// Append `child`, replacing a document with the same URI
    ///
    /// A node that is already a child moves to the end. Returns the replaced
    /// document, if any.
    pub fn add_child(&self, child: impl Into<IndexNode>) -> Option<Arc<DocumentElement>> {
        let child = child.into();
        let id = child.id();
        let mut children = self.children.write();
        let replaced = match &child {
            IndexNode::Document(document) => {
                let replaced = children.take_document(document.uri());
                children.documents.insert(document.uri().clone(), id);
                replaced
            }
            IndexNode::Element(_) => None,
        };
        trace!(
            project = %self.name,
            %id,
            replaced = replaced.is_some(),
            "index child added"
        );
        children.nodes.shift_remove(&id);
        children.nodes.insert(id, child);
        replaced
    }

    /// Insert or replace a fully built document
    pub fn replace_document(&self, document: Arc<DocumentElement>) -> Option<Arc<DocumentElement>> {
        self.add_child(document)
    }

    /// Remove the document with `uri`; no-op when absent
    pub fn remove_document(&self, uri: &str) -> Option<Arc<DocumentElement>> {
        self.children.write().take_document(uri)
    }

    /// Remove the child with identity `id`; no-op when absent
    pub fn remove_child(&self, id: ElementId) -> bool {
        let mut children = self.children.write();
        match children.nodes.shift_remove(&id) {
            Some(IndexNode::Document(document)) => {
                children.documents.remove(document.uri().as_str());
                true
            }
            Some(IndexNode::Element(_)) => true,
            None => false,
        }
    }

    /// Snapshot of the children in order
    pub fn children(&self) -> Vec<IndexNode> {
        self.children.read().nodes.values().cloned().collect()
    }

    pub fn child_count(&self) -> usize {
        self.children.read().nodes.len()
    }

    pub fn documents(&self) -> Vec<Arc<DocumentElement>> {
        self.children
            .read()
            .nodes
            .values()
            .filter_map(IndexNode::as_document)
            .cloned()
            .collect()
    }

    pub fn document(&self, uri: &str) -> Option<Arc<DocumentElement>> {
        self.children.read().document(uri).cloned()
    }

    /// Depth-first, pre-order matches over all children
    pub fn nodes_matching<F>(&self, predicate: F) -> Vec<Arc<IndexElement>>
    where
        F: Fn(&IndexElement) -> bool,
    {
        let mut found = Vec::new();
        for child in self.children() {
            child.collect_matching(&predicate, &mut found);
        }
        found
    }
}
