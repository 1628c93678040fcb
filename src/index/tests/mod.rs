#![allow(clippy::unwrap_used)]

mod tests_element;

use super::{Bean, DocumentElement, ElementKind, EventListener, IndexElement, Location};
use crate::base::Span;

fn span(line: u32) -> Span {
    Span::from_coords(line, 0, line, 10)
}

fn bean(name: &str, uri: &str, line: u32) -> IndexElement {
    IndexElement::from(Bean::new(name, format!("com.example.{name}"), Location::new(uri, span(line))))
}

fn listener(event: &str, uri: &str, line: u32) -> IndexElement {
    IndexElement::new(ElementKind::EventListener(EventListener::new(
        event,
        Location::new(uri, span(line)),
        "com.example.Listener",
    )))
}

/// A document holding one bean per name
fn document(uri: &str, beans: &[&str]) -> DocumentElement {
    DocumentElement::new(uri).with_children(
        beans
            .iter()
            .enumerate()
            .map(|(line, name)| bean(name, uri, line as u32)),
    )
}
