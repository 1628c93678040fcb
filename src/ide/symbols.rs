//! Symbol projection: the index tree seen as a symbol hierarchy.
//!
//! Symbol-bearing elements become symbols; other elements are transparent
//! and their symbol-bearing descendants are hoisted to the nearest
//! symbol-bearing ancestor (or the top level), keeping their relative order.

use std::sync::Arc;

use crate::index::{
    DocumentElement, DocumentSymbol, IndexElement, IndexNode, ProjectElement, WorkspaceSymbol,
};

/// Project a list of elements into top-level symbols, in order.
pub fn element_symbols(elements: &[Arc<IndexElement>]) -> Vec<DocumentSymbol> {
    elements.iter().flat_map(|e| project_element(e)).collect()
}

fn project_element(element: &IndexElement) -> Vec<DocumentSymbol> {
    let nested = element_symbols(element.children());
    match element.document_symbol() {
        Some(mut symbol) => {
            symbol.children = nested;
            vec![symbol]
        }
        None => nested,
    }
}

/// Outline of one document.
pub fn document_symbols(document: &DocumentElement) -> Vec<DocumentSymbol> {
    element_symbols(document.children())
}

/// Outline of a whole project: documents and project-level elements, in order.
pub fn project_symbols(project: &ProjectElement) -> Vec<DocumentSymbol> {
    project
        .children()
        .iter()
        .flat_map(|child| match child {
            IndexNode::Document(document) => document_symbols(document),
            IndexNode::Element(element) => project_element(element),
        })
        .collect()
}

/// Search symbols across projects.
///
/// Documents are filtered by `document_filter`, then every symbol-bearing
/// element of a surviving document (depth-first, without nesting) by
/// `symbol_filter`. Results follow document order, then order within the
/// document.
pub fn workspace_symbols<D, S>(
    projects: &[Arc<ProjectElement>],
    document_filter: D,
    symbol_filter: S,
) -> Vec<WorkspaceSymbol>
where
    D: Fn(&DocumentElement) -> bool,
    S: Fn(&DocumentSymbol) -> bool,
{
    projects
        .iter()
        .flat_map(|project| project.documents())
        .filter(|document| document_filter(document))
        .flat_map(|document| {
            document
                .nodes_matching(IndexElement::is_symbol)
                .iter()
                .filter_map(|element| element.document_symbol())
                .filter(|symbol| symbol_filter(symbol))
                .map(|symbol| WorkspaceSymbol::new(&symbol, document.uri()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Case-insensitive substring match on the symbol name; empty matches all.
pub fn name_matches(query: &str) -> impl Fn(&DocumentSymbol) -> bool + use<> {
    let query = query.to_lowercase();
    move |symbol| query.is_empty() || symbol.name.to_lowercase().contains(&query)
}
