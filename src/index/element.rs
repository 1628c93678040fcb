//! Index elements: the framework constructs discovered in a document

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use uuid::Uuid;

use super::{DocumentSymbol, Location, SymbolKind};
use crate::base::Span;

/// Identity of a node in the index tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

const OBJECT_TYPE: &str = "java.lang.Object";

/// Last segment of a dotted type name
pub fn simple_type_name(type_name: &str) -> &str {
    match type_name.rfind('.') {
        Some(index) if index > 0 => &type_name[index + 1..],
        _ => type_name,
    }
}

// ============================================================================
// ELEMENT DATA
// ============================================================================

/// An annotation found on a type, method or field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationMetadata {
    pub annotation_type: SmolStr,
    /// Present through another annotation rather than written directly
    pub is_meta_annotation: bool,
    pub location: Option<Location>,
}

impl AnnotationMetadata {
    pub fn new(annotation_type: impl Into<SmolStr>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
            is_meta_annotation: false,
            location: None,
        }
    }

    pub fn meta(mut self) -> Self {
        self.is_meta_annotation = true;
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// A bean definition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bean {
    pub name: SmolStr,
    pub type_name: SmolStr,
    pub location: Location,
    /// Supertypes without `java.lang.Object`
    supertypes: Vec<SmolStr>,
    is_interface: bool,
    pub annotations: Vec<AnnotationMetadata>,
    pub is_configuration: bool,
    pub symbol_label: SmolStr,
}

impl Bean {
    pub fn new(
        name: impl Into<SmolStr>,
        type_name: impl Into<SmolStr>,
        location: Location,
    ) -> Self {
        let name = name.into();
        Self {
            symbol_label: name.clone(),
            name,
            type_name: type_name.into(),
            location,
            supertypes: Vec::new(),
            is_interface: true,
            annotations: Vec::new(),
            is_configuration: false,
        }
    }

    /// Set the supertypes; a bean whose supertypes lack `java.lang.Object`
    /// is an interface
    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut is_interface = true;
        self.supertypes = supertypes
            .into_iter()
            .map(Into::<SmolStr>::into)
            .filter(|t| {
                let object = t == OBJECT_TYPE;
                is_interface &= !object;
                !object
            })
            .collect();
        self.is_interface = is_interface;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<AnnotationMetadata>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn configuration(mut self, is_configuration: bool) -> Self {
        self.is_configuration = is_configuration;
        self
    }

    pub fn with_symbol_label(mut self, label: impl Into<SmolStr>) -> Self {
        self.symbol_label = label.into();
        self
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// All supertypes, with `java.lang.Object` for classes
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        let object = (!self.is_interface).then_some(OBJECT_TYPE);
        self.supertypes.iter().map(SmolStr::as_str).chain(object)
    }

    /// Whether the bean can be injected where `type_name` is expected
    pub fn is_type_compatible_with(&self, type_name: &str) -> bool {
        self.type_name == type_name
            || self.supertypes.iter().any(|t| t == type_name)
            || (type_name == OBJECT_TYPE && !self.is_interface)
    }
}

/// A dependency of a bean (constructor parameter, field, setter)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectionPoint {
    pub name: SmolStr,
    pub type_name: SmolStr,
    pub location: Location,
    pub annotations: Vec<AnnotationMetadata>,
}

impl InjectionPoint {
    pub fn new(name: impl Into<SmolStr>, type_name: impl Into<SmolStr>, location: Location) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            location,
            annotations: Vec::new(),
        }
    }
}

/// A method reacting to application events
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventListener {
    pub event_type: SmolStr,
    pub location: Location,
    pub container_bean_type: SmolStr,
    pub annotations: Vec<AnnotationMetadata>,
}

impl EventListener {
    pub fn new(
        event_type: impl Into<SmolStr>,
        location: Location,
        container_bean_type: impl Into<SmolStr>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            location,
            container_bean_type: container_bean_type.into(),
            annotations: Vec::new(),
        }
    }
}

/// A web endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMapping {
    pub path: SmolStr,
    pub http_methods: Vec<SmolStr>,
    pub content_types: Vec<SmolStr>,
    pub accept_types: Vec<SmolStr>,
    pub version: Option<SmolStr>,
    pub range: Span,
    pub symbol_label: SmolStr,
}

impl RequestMapping {
    /// An endpoint labelled `@path -- METHODS`
    pub fn new<I, S>(path: impl Into<SmolStr>, http_methods: I, range: Span) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let path = path.into();
        let http_methods: Vec<SmolStr> = http_methods.into_iter().map(Into::into).collect();
        let symbol_label = if http_methods.is_empty() {
            SmolStr::from(format!("@{path}"))
        } else {
            let methods: Vec<&str> = http_methods.iter().map(SmolStr::as_str).collect();
            SmolStr::from(format!("@{path} -- {}", methods.join(" ")))
        };
        Self {
            path,
            http_methods,
            content_types: Vec::new(),
            accept_types: Vec::new(),
            version: None,
            range,
            symbol_label,
        }
    }
}

/// A class carrying architectural stereotypes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stereotype {
    pub type_name: SmolStr,
    pub location: Location,
    pub supertypes: Vec<SmolStr>,
    pub annotation_types: Vec<SmolStr>,
}

impl Stereotype {
    pub fn does_implement(&self, type_name: &str) -> bool {
        self.type_name == type_name || self.supertypes.iter().any(|t| t == type_name)
    }
}

/// An interface a module exposes to other modules
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedInterface {
    pub name: SmolStr,
    pub module: SmolStr,
}

// ============================================================================
// INDEX ELEMENT
// ============================================================================

/// What an index element is
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Bean(Bean),
    InjectionPoint(InjectionPoint),
    EventListener(EventListener),
    RequestMapping(RequestMapping),
    Stereotype(Stereotype),
    NamedInterface(NamedInterface),
    /// Structural container with no symbol of its own
    Group,
}

/// A node of a document's subtree
///
/// Elements are immutable once built; a document is re-indexed by replacing
/// it as a whole.
#[derive(Debug)]
pub struct IndexElement {
    id: ElementId,
    kind: ElementKind,
    children: Vec<Arc<IndexElement>>,
}

impl IndexElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
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

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn children(&self) -> &[Arc<IndexElement>] {
        &self.children
    }

    pub fn as_bean(&self) -> Option<&Bean> {
        match &self.kind {
            ElementKind::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Bean(_) | ElementKind::EventListener(_) | ElementKind::RequestMapping(_)
        )
    }

    /// This element's own symbol, without nested symbols
    pub fn document_symbol(&self) -> Option<DocumentSymbol> {
        match &self.kind {
            ElementKind::Bean(bean) => Some(DocumentSymbol::new(
                bean.symbol_label.clone(),
                SymbolKind::Class,
                bean.location.range,
            )),
            ElementKind::EventListener(listener) => Some(DocumentSymbol::new(
                format!("listens on: {}", simple_type_name(&listener.event_type)),
                SymbolKind::Event,
                listener.location.range,
            )),
            ElementKind::RequestMapping(mapping) => Some(DocumentSymbol::new(
                mapping.symbol_label.clone(),
                SymbolKind::Method,
                mapping.range,
            )),
            ElementKind::InjectionPoint(_)
            | ElementKind::Stereotype(_)
            | ElementKind::NamedInterface(_)
            | ElementKind::Group => None,
        }
    }
}

impl From<ElementKind> for IndexElement {
    fn from(kind: ElementKind) -> Self {
        Self::new(kind)
    }
}

impl From<Bean> for IndexElement {
    fn from(bean: Bean) -> Self {
        Self::new(ElementKind::Bean(bean))
    }
}
