#![allow(clippy::unwrap_used)]


use tokio_util::sync::CancellationToken;

use super::{DocumentChange, DocumentIndexer};
use crate::base::Span;
use crate::index::{Bean, IndexElement, Location};

/// Indexes one bean per `bean <Name>` line
struct LineBeanIndexer;

impl DocumentIndexer for LineBeanIndexer {
    fn name(&self) -> &str {
        "line-beans"
    }

    fn index(&self, change: &DocumentChange, _cancel: &CancellationToken) -> Vec<IndexElement> {
        change
            .text
            .lines()
            .enumerate()
            .filter_map(|(line, text)| {
                let name = text.trim().strip_prefix("bean ")?;
                let range = Span::from_coords(line as u32, 0, line as u32, text.len() as u32);
                Some(IndexElement::from(Bean::new(
                    name,
                    format!("com.example.{name}"),
                    Location::new(change.uri.clone(), range),
                )))
            })
            .collect()
    }
}

/// Cancels its own work, like newer work arriving mid-index
struct InterruptedIndexer;

impl DocumentIndexer for InterruptedIndexer {
    fn name(&self) -> &str {
        "interrupted"
    }

    fn index(&self, _change: &DocumentChange, cancel: &CancellationToken) -> Vec<IndexElement> {
        cancel.cancel();
        Vec::new()
    }
}

fn change(project: &str, uri: &str, version: u64, text: &str) -> DocumentChange {
    DocumentChange::new(project, uri, version, text)
}
