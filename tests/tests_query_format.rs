//! Query formatting through the public API

use rstest::rstest;
use bootls::format::{FormatOptions, JpqlQueryFormatter, JsonQueryFormatter, QueryFormatter};

fn unindented() -> FormatOptions {
    FormatOptions::default().with_base_level(0)
}

#[rstest]
#[case("SELECT e FROM Employee e", "SELECT e\nFROM Employee e")]
#[case(
    "select e from Employee e where e.active = true order by e.name",
    "select e\nfrom Employee e\nwhere e.active = true\norder by e.name"
)]
#[case(
    "SELECT e.dept, count(e) FROM Employee e GROUP BY e.dept HAVING count(e) > 1",
    "SELECT e.dept, count(e)\nFROM Employee e\nGROUP BY e.dept\nHAVING count(e) > 1"
)]
#[case("DELETE FROM Employee e WHERE e.id=:id", "DELETE\nFROM Employee e\nWHERE e.id=:id")]
#[case("   SELECT\n\n e   FROM   Employee e ", "SELECT e\nFROM Employee e")]
#[case("SELECT p.from FROM Purchase p", "SELECT p.from\nFROM Purchase p")]
fn test_jpql_layout(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(JpqlQueryFormatter::new(unindented()).format(input), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("SELECT e FROM Employee e WHERE e.name = 'open")]
#[case("SELECT e ~ x")]
fn test_jpql_unformattable_input_is_unchanged(#[case] input: &str) {
    assert_eq!(JpqlQueryFormatter::default().format(input), input);
}

#[test]
fn test_jpql_default_indentation() {
    assert_eq!(
        JpqlQueryFormatter::default().format("SELECT e FROM Employee e"),
        "        SELECT e\n        FROM Employee e"
    );
}

#[test]
fn test_formatting_is_stable() {
    let formatter = JpqlQueryFormatter::new(unindented());
    let once = formatter.format("SELECT e FROM Employee e WHERE e.id = ?1");
    assert_eq!(formatter.format(&once), once);
}

#[rstest]
#[case(r#"{"a":1}"#, "{\n    \"a\": 1\n}")]
#[case("[]", "[]")]
#[case(r#"{"q": {"$in": [1, 2]}}"#, "{\n    \"q\": {\n        \"$in\": [\n            1,\n            2\n        ]\n    }\n}")]
fn test_json_layout(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(JsonQueryFormatter::new(unindented()).format(input), expected);
}

#[test]
fn test_json_invalid_input_is_unchanged() {
    assert_eq!(JsonQueryFormatter::default().format("{\"a\": }"), "{\"a\": }");
}

#[test]
fn test_format_missing_query() {
    assert_eq!(JpqlQueryFormatter::default().format_opt(None), None);
}
