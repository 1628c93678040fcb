use tokio_util::sync::CancellationToken;

use super::{error_spans, range};
use crate::syntax::SyntaxKind;
use crate::syntax::cron::{CronField, parse_cron, validate_fields};

fn parse(input: &str) -> crate::syntax::Parse {
    parse_cron(input, &CancellationToken::new()).unwrap()
}

fn assert_valid(input: &str) {
    let parse = parse(input);
    assert!(parse.ok(), "{input}: {:?}", parse.errors);
    let issues = validate_fields(&parse.syntax());
    assert!(issues.is_empty(), "{input}: {issues:?}");
}

// ============================================================================
// Syntax
// ============================================================================

#[test]
fn test_six_fields() {
    let parse = parse("0 0 0 L-3 * *");
    assert!(parse.ok());
    let fields = parse
        .syntax()
        .children()
        .filter(|n| n.kind() == SyntaxKind::CRON_FIELD)
        .count();
    assert_eq!(fields, 6);
}

#[test]
fn test_lossless() {
    let input = "  0 0/5  * ? JAN-MAR MON,WED ";
    assert_eq!(parse(input).syntax().text().to_string(), input);
}

#[test]
fn test_field_range_excludes_whitespace() {
    let parse = parse("0  15 * * * *");
    let second = parse
        .syntax()
        .children()
        .filter(|n| n.kind() == SyntaxKind::CRON_FIELD)
        .nth(1)
        .unwrap();
    assert_eq!(second.text_range(), range(3, 5));
}

#[test]
fn test_misplaced_suffix_and_unknown_name() {
    let parse = parse("0 0 0 8LW * MARCH-JUL");
    assert_eq!(error_spans(&parse), vec![(7, 2), (12, 5)]);
    assert!(parse.errors[1].message.contains("MARCH"));
}

#[test]
fn test_unrecognized_character() {
    let parse = parse("10/2. * * ? * MON-5");
    assert_eq!(error_spans(&parse), vec![(4, 1)]);
    assert!(parse.errors[0].unrecognized);
    assert!(validate_fields(&parse.syntax()).is_empty());
}

#[test]
fn test_wrong_field_count() {
    let parse = parse("0 0 * *");
    assert_eq!(error_spans(&parse), vec![(0, 7)]);
    assert!(parse.errors[0].message.contains("found 4"));
}

#[test]
fn test_empty_expression() {
    let parse = parse("");
    assert_eq!(parse.errors.len(), 1);
}

#[test]
fn test_macros() {
    assert!(parse("@daily").ok());
    assert!(parse("@Hourly").ok());
    assert_eq!(error_spans(&parse("@often")), vec![(0, 6)]);
    assert_eq!(parse("@daily 0").errors.len(), 1);
}

#[test]
fn test_dangling_separators() {
    assert!(!parse("0 0 0 1, * *").ok());
    assert!(!parse("0 0 0 1- * *").ok());
    assert!(!parse("0 */ 0 1 * *").ok());
}

#[test]
fn test_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(parse_cron("0 0 0 * * *", &cancel).is_err());
}

// ============================================================================
// Field validation
// ============================================================================

#[test]
fn test_valid_expressions() {
    for input in [
        "0 0 12 * * MON-FRI",
        "0 0/15 * * * *",
        "*/10 * * * * *",
        "0 0 0 ? * 5L",
        "0 0 0 ? * FRI#2",
        "0 0 0 15W * ?",
        "0 0 0 LW * ?",
        "0 0 0 L * *",
        "0 0 9-17 * JAN-MAR,DEC SUN",
        "0 0 0 1 1 0",
    ] {
        assert_valid(input);
    }
}

#[test]
fn test_month_names_in_day_of_week() {
    let parse = parse("0 0 0 8 * MAR-JUL");
    assert!(parse.ok());
    let issues = validate_fields(&parse.syntax());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, CronField::DayOfWeek);
    assert_eq!(issues[0].range, range(10, 17));
}

#[test]
fn test_month_names_in_seconds() {
    let issues = validate_fields(&parse("MAR-JUL 0 0 8 * *").syntax());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, CronField::Second);
    assert_eq!(issues[0].range, range(0, 7));
}

#[test]
fn test_out_of_range() {
    let issues = validate_fields(&parse("0 0 25 * * *").syntax());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, CronField::Hour);
    assert_eq!(issues[0].range, range(4, 6));
}

#[test]
fn test_one_issue_per_field() {
    let issues = validate_fields(&parse("0 0 0 8 * 9,10,11").syntax());
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_misplaced_special_characters() {
    for input in [
        "0 0 0 8 * 5-1",
        "0 0 0 L * 5#9",
        "0 0 0 8 JAN-MAR L",
        "? 0 0 8 * *",
        "0 0 0 5L * *",
        "0 0 0 1 1#2 *",
        "0 0/0 0 1 * *",
        "0 0 0 L-31 * *",
    ] {
        let parse = parse(input);
        assert!(parse.ok(), "{input}: {:?}", parse.errors);
        assert_eq!(validate_fields(&parse.syntax()).len(), 1, "{input}");
    }
}

#[test]
fn test_skips_validation_when_malformed() {
    assert!(validate_fields(&parse("0 0 99 * *").syntax()).is_empty());
    assert!(validate_fields(&parse("0 0 0 8LW * MON").syntax()).is_empty());
}
