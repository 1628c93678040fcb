//! IDE features: session state and symbol queries for LSP handlers.
//!
//! ## Design Principles
//!
//! 1. **Snapshots for reads**: queries run on an [`Analysis`] and never block writers
//! 2. **No LSP types**: uses our own types, converted at the LSP boundary
//! 3. **Newest wins**: re-index results are applied in version order per URI
//!
//! ## Usage
//!
//! ```ignore
//! use bootls::ide::{AnalysisHost, DocumentChange};
//!
//! let host = AnalysisHost::new().with_indexer(indexer);
//! host.reindex(&DocumentChange::new("app", "file:///Jobs.java", 1, text));
//!
//! let analysis = host.analysis();
//! let symbols = analysis.workspace_symbols("orders", None);
//! ```

mod analysis;
mod scheduler;
mod symbols;

#[cfg(test)]
mod tests;

pub use analysis::{Analysis, AnalysisHost, DocumentChange, DocumentIndexer, IndexOutcome};
pub use scheduler::{IndexError, IndexScheduler, IndexTicket};
pub use symbols::{
    document_symbols, element_symbols, name_matches, project_symbols, workspace_symbols,
};
