//! Positioned symbols rendered by symbol-bearing index elements

use smol_str::SmolStr;

use crate::base::Span;

/// Symbol kind tag, numbered like the LSP `SymbolKind`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Module,
    Class,
    Method,
    Field,
    Interface,
    Event,
}

impl SymbolKind {
    /// Convert to LSP symbol kind number.
    pub fn to_lsp(self) -> u32 {
        match self {
            SymbolKind::Module => 2,
            SymbolKind::Class => 5,
            SymbolKind::Method => 6,
            SymbolKind::Field => 8,
            SymbolKind::Interface => 11,
            SymbolKind::Event => 24,
        }
    }
}

/// A range in a document
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub uri: SmolStr,
    pub range: Span,
}

impl Location {
    pub fn new(uri: impl Into<SmolStr>, range: Span) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

/// A symbol in a document outline, with nested symbols
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub range: Span,
    pub selection_range: Span,
    pub children: Vec<DocumentSymbol>,
}

impl DocumentSymbol {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, range: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            selection_range: range,
            children: Vec::new(),
        }
    }

    /// Total number of symbols in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DocumentSymbol::count).sum::<usize>()
    }
}

/// A symbol found by workspace search, paired with its document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceSymbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub location: Location,
}

impl WorkspaceSymbol {
    pub fn new(symbol: &DocumentSymbol, uri: &SmolStr) -> Self {
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            location: Location::new(uri.clone(), symbol.range),
        }
    }
}
