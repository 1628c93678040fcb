//! The semantic index seen from an LSP session

use std::sync::Arc;

use rstest::rstest;
use bootls::Span;
use bootls::ide::{AnalysisHost, DocumentChange, DocumentIndexer, IndexOutcome};
use bootls::index::{Bean, DocumentElement, ElementKind, IndexElement, Location, RequestMapping};
use tokio_util::sync::CancellationToken;

/// One bean per `@Component <Name>` line, one endpoint per `@GetMapping <path>` line
struct AnnotationLines;

impl DocumentIndexer for AnnotationLines {
    fn name(&self) -> &str {
        "annotation-lines"
    }

    fn index(&self, change: &DocumentChange, _cancel: &CancellationToken) -> Vec<IndexElement> {
        let mut elements = Vec::new();
        for (line, text) in change.text.lines().enumerate() {
            let range = Span::from_coords(line as u32, 0, line as u32, text.len() as u32);
            if let Some(name) = text.strip_prefix("@Component ") {
                elements.push(IndexElement::from(Bean::new(
                    name,
                    format!("com.example.{name}"),
                    Location::new(change.uri.clone(), range),
                )));
            } else if let Some(path) = text.strip_prefix("@GetMapping ") {
                elements.push(IndexElement::new(ElementKind::RequestMapping(
                    RequestMapping::new(path, ["GET"], range),
                )));
            }
        }
        elements
    }
}

fn host() -> AnalysisHost {
    AnalysisHost::new().with_indexer(Arc::new(AnnotationLines))
}

fn symbol_names(host: &AnalysisHost, query: &str, project: Option<&str>) -> Vec<String> {
    host.analysis()
        .workspace_symbols(query, project)
        .into_iter()
        .map(|s| s.name.to_string())
        .collect()
}

#[test]
fn test_project_lifecycle() {
    let host = host();
    host.reindex(&DocumentChange::new("P", "file:///d1.java", 1, "@Component Orders"));
    host.reindex(&DocumentChange::new("P", "file:///d2.java", 1, "@GetMapping /orders\n@Component Users"));
    host.reindex(&DocumentChange::new("Q", "file:///q.java", 1, "@Component OrdersClient"));

    assert_eq!(
        symbol_names(&host, "orders", None),
        vec!["Orders", "@/orders -- GET", "OrdersClient"]
    );
    assert_eq!(symbol_names(&host, "orders", Some("P")), vec!["Orders", "@/orders -- GET"]);

    assert!(host.close_document("P", "file:///d1.java"));
    assert_eq!(symbol_names(&host, "orders", Some("P")), vec!["@/orders -- GET"]);
    assert_eq!(host.index().project("P").unwrap().child_count(), 1);
}

#[rstest]
#[case(1, 2, IndexOutcome::Applied { elements: 1 })]
#[case(2, 2, IndexOutcome::Applied { elements: 1 })]
#[case(3, 2, IndexOutcome::Superseded)]
fn test_version_ordering(#[case] first: u64, #[case] second: u64, #[case] expected: IndexOutcome) {
    let host = host();
    host.reindex(&DocumentChange::new("P", "file:///A.java", first, "@Component First"));
    let outcome = host.reindex(&DocumentChange::new("P", "file:///A.java", second, "@Component Second"));
    assert_eq!(outcome, expected);

    let winner = if expected == IndexOutcome::Superseded { "First" } else { "Second" };
    assert_eq!(symbol_names(&host, "", Some("P")), vec![winner]);
}

#[test]
fn test_reindex_replaces_not_duplicates() {
    let host = host();
    for version in 1..=5 {
        host.reindex(&DocumentChange::new("P", "file:///A.java", version, "@Component Orders"));
    }
    let project = host.index().project("P").unwrap();
    assert_eq!(project.child_count(), 1);
    assert_eq!(host.index().beans_with_name("P", "Orders").len(), 1);
}

#[test]
fn test_projection_is_idempotent() {
    let host = host();
    host.reindex(&DocumentChange::new("P", "file:///A.java", 1, "@Component A\n@GetMapping /a"));
    let analysis = host.analysis();
    assert_eq!(analysis.document_symbols("file:///A.java"), analysis.document_symbols("file:///A.java"));
    assert_eq!(analysis.project_symbols("P"), analysis.document_symbols("file:///A.java"));
}

#[test]
fn test_project_level_elements_are_kept_on_reindex() {
    let host = host();
    let project = host.index().project_or_insert("P");
    project.add_child(IndexElement::from(Bean::new(
        "dataSource",
        "javax.sql.DataSource",
        Location::new("file:///application.properties", Span::from_coords(0, 0, 0, 10)),
    )));
    project.add_child(DocumentElement::new("file:///A.java"));

    host.reindex(&DocumentChange::new("P", "file:///A.java", 1, "@Component Orders"));
    assert_eq!(project.child_count(), 2);
    assert_eq!(symbol_names(&host, "", Some("P")), vec!["Orders"]);
    assert_eq!(host.analysis().project_symbols("P").len(), 2);
}

#[test]
fn test_parallel_sessions_on_distinct_uris() {
    let host = host();
    let changes: Vec<_> = (0..32)
        .map(|i| DocumentChange::new("P", format!("file:///D{i}.java"), 1, format!("@Component Bean{i}")))
        .collect();
    let outcomes = host.reindex_all(&changes);
    assert_eq!(outcomes.len(), 32);
    assert_eq!(host.index().beans_of_project("P").len(), 32);
}
