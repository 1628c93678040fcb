use super::{bean, listener, span};
use crate::index::{
    Bean, ElementId, ElementKind, IndexElement, Location, RequestMapping, SymbolKind,
    simple_type_name,
};

fn location() -> Location {
    Location::new("file:///A.java", span(3))
}

#[test]
fn test_element_ids_are_unique() {
    assert_ne!(ElementId::new(), ElementId::new());
    let a = IndexElement::new(ElementKind::Group);
    let b = IndexElement::new(ElementKind::Group);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_bean_symbol() {
    let element = IndexElement::from(
        Bean::new("orders", "com.example.Orders", location())
            .with_symbol_label("@+ 'orders' (@Component) Orders"),
    );
    let symbol = element.document_symbol().unwrap();
    assert_eq!(symbol.name, "@+ 'orders' (@Component) Orders");
    assert_eq!(symbol.kind, SymbolKind::Class);
    assert_eq!(symbol.range, span(3));
    assert_eq!(symbol.selection_range, span(3));
    assert!(symbol.children.is_empty());
}

#[test]
fn test_default_bean_label_is_name() {
    let element = bean("orders", "file:///A.java", 0);
    assert_eq!(element.document_symbol().unwrap().name, "orders");
}

#[test]
fn test_event_listener_symbol_uses_simple_type() {
    let element = listener("com.example.OrderPlaced", "file:///A.java", 1);
    let symbol = element.document_symbol().unwrap();
    assert_eq!(symbol.name, "listens on: OrderPlaced");
    assert_eq!(symbol.kind, SymbolKind::Event);
}

#[test]
fn test_request_mapping_label() {
    let mapping = RequestMapping::new("/orders", ["GET", "POST"], span(2));
    assert_eq!(mapping.symbol_label, "@/orders -- GET POST");
    let element = IndexElement::new(ElementKind::RequestMapping(mapping));
    assert_eq!(element.document_symbol().unwrap().kind, SymbolKind::Method);

    let any = RequestMapping::new("/health", Vec::<&str>::new(), span(2));
    assert_eq!(any.symbol_label, "@/health");
}

#[test]
fn test_non_symbol_kinds() {
    assert!(IndexElement::new(ElementKind::Group).document_symbol().is_none());
    assert!(!IndexElement::new(ElementKind::Group).is_symbol());
    assert!(bean("a", "file:///A.java", 0).is_symbol());
}

#[test]
fn test_simple_type_name() {
    assert_eq!(simple_type_name("com.example.Event"), "Event");
    assert_eq!(simple_type_name("Event"), "Event");
    assert_eq!(simple_type_name(".Event"), ".Event");
}

#[test]
fn test_bean_supertypes() {
    let class = Bean::new("a", "com.example.A", location())
        .with_supertypes(["java.lang.Object", "com.example.Base"]);
    assert!(!class.is_interface());
    assert_eq!(
        class.supertypes().collect::<Vec<_>>(),
        vec!["com.example.Base", "java.lang.Object"]
    );
    assert!(class.is_type_compatible_with("com.example.A"));
    assert!(class.is_type_compatible_with("com.example.Base"));
    assert!(class.is_type_compatible_with("java.lang.Object"));
    assert!(!class.is_type_compatible_with("com.example.Other"));

    let interface = Bean::new("b", "com.example.B", location()).with_supertypes(["com.example.Base"]);
    assert!(interface.is_interface());
    assert!(!interface.is_type_compatible_with("java.lang.Object"));
    assert_eq!(interface.supertypes().count(), 1);
}

#[test]
fn test_children_keep_order() {
    let group = IndexElement::new(ElementKind::Group)
        .with_child(bean("a", "file:///A.java", 0))
        .with_children([bean("b", "file:///A.java", 1), bean("c", "file:///A.java", 2)]);
    let names: Vec<_> = group
        .children()
        .iter()
        .map(|c| c.as_bean().unwrap().name.clone())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}
