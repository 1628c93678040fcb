use tokio_util::sync::CancellationToken;

use super::{error_spans, has_token};
use crate::syntax::spel::parse_spel;
use crate::syntax::{MAX_NESTING, Parse, ParseError, SyntaxKind};

fn parse(input: &str) -> Parse {
    parse_spel(input, &CancellationToken::new()).unwrap()
}

fn root_kind(input: &str) -> SyntaxKind {
    parse(input).syntax().first_child().unwrap().kind()
}

#[test]
fn test_valid_expressions() {
    for input in [
        "1 + 2 * 3",
        "@bean.method(#arg, 'x')",
        "T(java.lang.Math).random() > 0.5 ? 'a' : 'b'",
        "${app.name:x} + 'y'",
        "list.?[age > 18].![name]",
        "a and not b or c",
        "new java.util.ArrayList()",
        "user?.address?.city ?: 'unknown'",
        "#root.args[0] matches '[a-z]+'",
        "x = 'value'",
        "&factoryBean",
        "2 ^ 10 div 4 mod 3",
        "{1, 2} between {0, 5}",
        "'It''s'",
        "0x1F + 10L + 1.5e3",
    ] {
        let parse = parse(input);
        assert!(parse.ok(), "{input}: {:?}", parse.errors);
    }
}

#[test]
fn test_precedence() {
    let parse = parse("1 + 2 * 3");
    let root = parse.syntax();
    let binary = root.first_child().unwrap();
    assert_eq!(binary.kind(), SyntaxKind::BINARY_EXPR);
    // 2 * 3 nests inside the addition
    assert!(binary.children().any(|n| n.kind() == SyntaxKind::BINARY_EXPR));
}

#[test]
fn test_inline_collections() {
    assert_eq!(root_kind("{1,2,3}"), SyntaxKind::INLINE_LIST);
    assert_eq!(root_kind("{}"), SyntaxKind::INLINE_LIST);
    assert_eq!(root_kind("{a:1, b:2}"), SyntaxKind::INLINE_MAP);
    assert_eq!(root_kind("{:}"), SyntaxKind::INLINE_MAP);
}

#[test]
fn test_placeholder_token() {
    let parse = parse("${app.name:x} + 'y'");
    assert!(has_token(&parse, SyntaxKind::PLACEHOLDER, "${app.name:x}"));
}

#[test]
fn test_placeholder_nested_braces() {
    let parse = parse("${a:${b}}");
    assert!(parse.ok());
    assert!(has_token(&parse, SyntaxKind::PLACEHOLDER, "${a:${b}}"));
}

#[test]
fn test_missing_operand() {
    let parse = parse("a +");
    assert_eq!(error_spans(&parse), vec![(3, 0)]);
}

#[test]
fn test_unclosed_paren() {
    let parse = parse("(a");
    assert_eq!(error_spans(&parse), vec![(2, 0)]);
    assert!(parse.errors[0].message.contains("')'"));
}

#[test]
fn test_unrecognized_token_is_skipped() {
    let parse = parse("a ~ b");
    assert_eq!(error_spans(&parse), vec![(2, 1), (4, 1)]);
    assert!(parse.errors[0].unrecognized);
    assert!(!parse.errors[1].unrecognized);
}

#[test]
fn test_empty_input() {
    assert_eq!(parse("").errors.len(), 1);
    assert_eq!(parse("   ").errors.len(), 1);
}

#[test]
fn test_lossless() {
    let input = "  a  +  b . c ( 1 ) ";
    assert_eq!(parse(input).syntax().text().to_string(), input);
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING * 2;
    let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let result = parse_spel(&input, &CancellationToken::new());
    assert_eq!(result.err(), Some(ParseError::NestingTooDeep(MAX_NESTING)));
}

#[test]
fn test_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = parse_spel("a + b", &cancel);
    assert_eq!(result.err(), Some(ParseError::Cancelled));
}
