use tokio_util::sync::CancellationToken;

use super::{error_spans, has_token};
use crate::syntax::jpql::{parse_jpql, tokenize};
use crate::syntax::{Parse, SyntaxKind};

fn parse(input: &str) -> Parse {
    parse_jpql(input, &CancellationToken::new()).unwrap()
}

#[test]
fn test_valid_queries() {
    for input in [
        "SELECT e FROM Employee e WHERE e.active = true",
        "select distinct e from Employee e left join fetch e.department d \
         where e.salary between 1000 and 2000 order by e.name desc",
        "UPDATE Employee e SET e.salary = e.salary * 1.1 WHERE e.id = :id",
        "DELETE FROM Employee e WHERE e.id IN (:ids)",
        "SELECT u FROM User u WHERE u.name = :#{#user.name}",
        "SELECT COUNT(e) FROM Employee e GROUP BY e.dept HAVING COUNT(e) > 5",
        "SELECT e FROM Employee e WHERE EXISTS (SELECT p FROM Project p WHERE p.lead = e)",
        "SELECT e FROM Employee e WHERE e.manager IS NOT NULL AND e.name NOT LIKE 'A%'",
        "SELECT CASE WHEN e.age > 18 THEN 'adult' ELSE 'minor' END FROM Employee e",
        "SELECT new com.example.Dto(e.id, e.name) FROM Employee e",
        "SELECT e.order FROM Employee e",
        "select e from Employee e where e.name = ?1 and e.age > ?2",
        "SELECT e FROM Employee e WHERE (e.a = 1 OR e.b = 2) AND NOT e.c = 3",
        "SELECT e FROM Employee e INNER JOIN e.projects p ON p.active = true",
        "FROM Employee",
    ] {
        let parse = parse(input);
        assert!(parse.ok(), "{input}: {:?}", parse.errors);
    }
}

#[test]
fn test_statement_kinds() {
    let kind = |input: &str| parse(input).syntax().first_child().unwrap().kind();
    assert_eq!(kind("SELECT e FROM E e"), SyntaxKind::SELECT_STATEMENT);
    assert_eq!(kind("UPDATE E e SET e.a = 1"), SyntaxKind::UPDATE_STATEMENT);
    assert_eq!(kind("DELETE FROM E e"), SyntaxKind::DELETE_STATEMENT);
}

#[test]
fn test_spel_region_token() {
    let parse = parse("SELECT u FROM User u WHERE u.id = ?#{ {1, 2}[0] }");
    assert!(parse.ok());
    assert!(has_token(&parse, SyntaxKind::SPEL_REGION, "?#{ {1, 2}[0] }"));
}

#[test]
fn test_missing_select_item() {
    let parse = parse("SELECT FROM Employee e");
    assert_eq!(error_spans(&parse), vec![(7, 4)]);
}

#[test]
fn test_missing_condition() {
    let parse = parse("SELECT e FROM Employee e WHERE");
    assert_eq!(error_spans(&parse), vec![(30, 0)]);
}

#[test]
fn test_repeated_clause_keyword_reported_once() {
    let parse = parse("SELECT u FROM User u WHERE WHERE x");
    assert_eq!(error_spans(&parse), vec![(27, 5)]);
    assert_eq!(parse.errors[0].message, "Expected an expression");
}

#[test]
fn test_misspelled_keyword() {
    assert!(!parse("SELECT e FORM Employee e").ok());
}

#[test]
fn test_empty_query() {
    assert_eq!(parse("").errors.len(), 1);
}

#[test]
fn test_unrecognized_character() {
    let parse = parse("SELECT e FROM Employee e WHERE e.a = #");
    assert!(parse.errors.iter().any(|e| e.unrecognized));
}

#[test]
fn test_tokenize_keywords_any_case() {
    let kinds: Vec<SyntaxKind> = tokenize("Select e fRoM").iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::SELECT_KW,
            SyntaxKind::WHITESPACE,
            SyntaxKind::IDENT,
            SyntaxKind::WHITESPACE,
            SyntaxKind::FROM_KW,
        ]
    );
}

#[test]
fn test_tokenize_offsets() {
    let tokens = tokenize("a  = :p");
    let offsets: Vec<u32> = tokens.iter().map(|t| t.offset.into()).collect();
    assert_eq!(offsets, vec![0, 1, 3, 4, 5]);
    assert_eq!(tokens[4].kind, SyntaxKind::NAMED_PARAM);
}
