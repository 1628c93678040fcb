//! Documents and the nodes a project owns

use std::sync::Arc;

use smol_str::SmolStr;

use super::{ElementId, IndexElement};

/// The elements discovered in one file
///
/// Built completely before it is added to a project; re-indexing a file
/// builds a new `DocumentElement` and replaces the old one.
#[derive(Debug)]
pub struct DocumentElement {
    id: ElementId,
    uri: SmolStr,
    children: Vec<Arc<IndexElement>>,
}

impl DocumentElement {
    pub fn new(uri: impl Into<SmolStr>) -> Self {
        Self {
            id: ElementId::new(),
            uri: uri.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: IndexElement) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = IndexElement>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn uri(&self) -> &SmolStr {
        &self.uri
    }

    pub fn children(&self) -> &[Arc<IndexElement>] {
        &self.children
    }

    /// Depth-first, pre-order matches below this document
    pub fn nodes_matching<F>(&self, predicate: F) -> Vec<Arc<IndexElement>>
    where
        F: Fn(&IndexElement) -> bool,
    {
        nodes_matching(&self.children, predicate)
    }
}

/// A direct child of a project
#[derive(Clone, Debug)]
pub enum IndexNode {
    Document(Arc<DocumentElement>),
    Element(Arc<IndexElement>),
}

impl IndexNode {
    pub fn id(&self) -> ElementId {
        match self {
            IndexNode::Document(document) => document.id(),
            IndexNode::Element(element) => element.id(),
        }
    }

    pub fn as_document(&self) -> Option<&Arc<DocumentElement>> {
        match self {
            IndexNode::Document(document) => Some(document),
            IndexNode::Element(_) => None,
        }
    }

    /// Collect matches in this node's subtree into `found`
    pub(crate) fn collect_matching<F>(&self, predicate: &F, found: &mut Vec<Arc<IndexElement>>)
    where
        F: Fn(&IndexElement) -> bool,
    {
        match self {
            IndexNode::Document(document) => {
                for child in document.children() {
                    collect(child, predicate, found);
                }
            }
            IndexNode::Element(element) => collect(element, predicate, found),
        }
    }
}

impl From<Arc<DocumentElement>> for IndexNode {
    fn from(document: Arc<DocumentElement>) -> Self {
        IndexNode::Document(document)
    }
}

impl From<DocumentElement> for IndexNode {
    fn from(document: DocumentElement) -> Self {
        IndexNode::Document(Arc::new(document))
    }
}

impl From<Arc<IndexElement>> for IndexNode {
    fn from(element: Arc<IndexElement>) -> Self {
        IndexNode::Element(element)
    }
}

impl From<IndexElement> for IndexNode {
    fn from(element: IndexElement) -> Self {
        IndexNode::Element(Arc::new(element))
    }
}

/// Depth-first, pre-order: every element under `roots` (roots included)
/// matching `predicate`, in document order
pub fn nodes_matching<F>(roots: &[Arc<IndexElement>], predicate: F) -> Vec<Arc<IndexElement>>
where
    F: Fn(&IndexElement) -> bool,
{
    let mut found = Vec::new();
    for root in roots {
        collect(root, &predicate, &mut found);
    }
    found
}

fn collect<F>(element: &Arc<IndexElement>, predicate: &F, found: &mut Vec<Arc<IndexElement>>)
where
    F: Fn(&IndexElement) -> bool,
{
    if predicate(element) {
        found.push(element.clone());
    }
    for child in element.children() {
        collect(child, predicate, found);
    }
}
