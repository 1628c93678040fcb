//! Spring cron expressions
//!
//! Six whitespace-separated fields (second, minute, hour, day-of-month,
//! month, day-of-week) or a single `@macro`. Fields are split on whitespace,
//! so the parser checks for a trivia boundary to find where a field ends.

mod fields;

pub use fields::{CronField, FieldIssue, validate_fields};

use logos::Logos;
use text_size::TextRange;
use tokio_util::sync::CancellationToken;

use super::SyntaxKind;
use super::parser::{Parse, ParseError, Parser, lex};

/// Number of fields in a Spring cron expression
pub const FIELD_COUNT: usize = 6;

/// Macros accepted in place of the six fields
pub const MACROS: &[&str] = &[
    "@yearly",
    "@annually",
    "@monthly",
    "@weekly",
    "@daily",
    "@midnight",
    "@hourly",
];

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[A-Za-z]+")]
    Ident,

    #[regex(r"@[A-Za-z]+")]
    Macro,

    #[token("*")]
    Star,
    #[token("?")]
    Question,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token(",")]
    Comma,
    #[token("#")]
    Hash,
}

impl From<CronToken> for SyntaxKind {
    fn from(token: CronToken) -> Self {
        match token {
            CronToken::Whitespace => SyntaxKind::WHITESPACE,
            CronToken::Integer => SyntaxKind::INTEGER,
            CronToken::Ident => SyntaxKind::IDENT,
            CronToken::Macro => SyntaxKind::CRON_MACRO,
            CronToken::Star => SyntaxKind::STAR,
            CronToken::Question => SyntaxKind::QUESTION,
            CronToken::Minus => SyntaxKind::MINUS,
            CronToken::Slash => SyntaxKind::SLASH,
            CronToken::Comma => SyntaxKind::COMMA,
            CronToken::Hash => SyntaxKind::HASH,
        }
    }
}

/// Parse a cron expression into a `CRON_EXPR` tree
pub fn parse_cron(input: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
    let tokens = lex::<CronToken>(input);
    let mut p = Parser::new(&tokens, input, cancel);
    p.start_root(SyntaxKind::CRON_EXPR);
    expression(&mut p);
    p.finish_root();
    p.finish()
}

fn expression(p: &mut Parser) {
    if p.at(SyntaxKind::CRON_MACRO) {
        let text = p.current_text();
        if !MACROS.iter().any(|m| m.eq_ignore_ascii_case(text)) {
            p.error(format!("Unknown cron macro '{text}'"));
        }
        p.bump();
        if !p.at_eof() {
            let message = p.unexpected();
            p.error_rest(message);
        }
        return;
    }

    let start = p.current_range().start();
    let mut count = 0;
    while !p.at_eof() {
        field(p);
        count += 1;
    }
    if count != FIELD_COUNT {
        let end = p.last_end().max(start);
        p.error_at(
            TextRange::new(start, end),
            format!("Cron expression must consist of {FIELD_COUNT} fields (found {count})"),
        );
    }
}

/// A field: items separated by commas, with no whitespace in between
fn field(p: &mut Parser) {
    p.start_node(SyntaxKind::CRON_FIELD);
    item(p);
    while adjacent(p) && p.at(SyntaxKind::COMMA) {
        p.bump();
        if !adjacent(p) || p.at_eof() {
            p.error_at(TextRange::empty(p.last_end()), "Expected a value after ','");
            break;
        }
        item(p);
    }
    if adjacent(p) {
        let message = p.unexpected();
        bad_rest(p, message);
    }
    p.finish_node();
}

fn item(p: &mut Parser) {
    p.start_node(SyntaxKind::CRON_ITEM);
    match p.current_kind() {
        SyntaxKind::STAR => {
            p.bump();
            step(p);
        }
        SyntaxKind::QUESTION => p.bump(),
        SyntaxKind::IDENT if p.at_word("L") => {
            p.bump();
            if adjacent(p) && p.at(SyntaxKind::MINUS) {
                p.bump();
                expect_adjacent(p, SyntaxKind::INTEGER, "an offset after 'L-'");
            }
        }
        SyntaxKind::IDENT if p.at_word("LW") => p.bump(),
        SyntaxKind::INTEGER | SyntaxKind::IDENT if at_value(p) => {
            p.bump();
            if adjacent(p) && (p.at_word("L") || p.at_word("W")) {
                p.bump();
            } else if adjacent(p) && p.at(SyntaxKind::HASH) {
                p.bump();
                expect_adjacent(p, SyntaxKind::INTEGER, "an ordinal after '#'");
            } else {
                if adjacent(p) && p.at(SyntaxKind::MINUS) {
                    p.bump();
                    if adjacent(p) && at_value(p) {
                        p.bump();
                    } else if adjacent(p) && !p.at_eof() {
                        let message = unknown_value_message(p);
                        bad_rest(p, message);
                    } else {
                        let at = TextRange::empty(p.last_end());
                        p.error_at(at, "Expected a range end after '-'");
                    }
                }
                step(p);
            }
        }
        SyntaxKind::IDENT => {
            let message = unknown_value_message(p);
            bad_rest(p, message);
        }
        _ => bad_rest(p, "Expected a cron value".to_string()),
    }
    p.finish_node();
}

fn step(p: &mut Parser) {
    if adjacent(p) && p.at(SyntaxKind::SLASH) {
        p.bump();
        expect_adjacent(p, SyntaxKind::INTEGER, "a step value after '/'");
    }
}

fn at_value(p: &Parser) -> bool {
    match p.current_kind() {
        SyntaxKind::INTEGER => true,
        SyntaxKind::IDENT => fields::is_known_name(p.current_text()),
        _ => false,
    }
}

fn unknown_value_message(p: &Parser) -> String {
    if p.at(SyntaxKind::IDENT) {
        format!("Unknown name '{}'", p.current_text())
    } else {
        p.unexpected()
    }
}

fn adjacent(p: &Parser) -> bool {
    !p.at_eof() && !p.at_trivia_boundary()
}

fn expect_adjacent(p: &mut Parser, kind: SyntaxKind, what: &str) {
    if adjacent(p) && p.at(kind) {
        p.bump();
    } else if adjacent(p) {
        bad_rest(p, format!("Expected {what}"));
    } else {
        p.error_at(TextRange::empty(p.last_end()), format!("Expected {what}"));
    }
}

/// Report `message` at the current token and swallow the rest of the field
fn bad_rest(p: &mut Parser, message: String) {
    p.error(message);
    p.start_node(SyntaxKind::ERROR);
    loop {
        p.bump();
        if !adjacent(p) {
            break;
        }
    }
    p.finish_node();
}
