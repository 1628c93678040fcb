//! Spring Expression Language (SpEL)
//!
//! Covers the expression forms found in annotations: literals, property
//! and method chains, safe navigation, indexers, selection and projection,
//! symbolic and textual operators, ternary and Elvis, type/bean/variable
//! references, constructors, inline lists and maps. Property placeholders
//! (`${...}`) lex as a single [`SyntaxKind::PLACEHOLDER`] token.

mod lexer;

pub use lexer::SpelToken;
pub(crate) use lexer::balanced_braces;

use tokio_util::sync::CancellationToken;

use super::SyntaxKind;
use super::parser::{Parse, ParseError, Parser, lex};

/// Parse a SpEL expression into a `SPEL_ROOT` tree
pub fn parse_spel(input: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
    let tokens = lex::<SpelToken>(input);
    let mut p = Parser::new(&tokens, input, cancel);
    p.start_root(SyntaxKind::SPEL_ROOT);
    if p.at_eof() {
        p.error("Expected an expression");
    } else {
        expression(&mut p);
        if !p.at_eof() {
            let message = p.unexpected();
            p.error_rest(message);
        }
    }
    p.finish_root();
    p.finish()
}

// =============================================================================
// Operators
// =============================================================================

struct BinaryLevel {
    symbols: &'static [SyntaxKind],
    words: &'static [&'static str],
}

/// Binary operator levels from loosest to tightest
const LEVELS: &[BinaryLevel] = &[
    BinaryLevel {
        symbols: &[SyntaxKind::PIPE_PIPE],
        words: &["or"],
    },
    BinaryLevel {
        symbols: &[SyntaxKind::AMP_AMP],
        words: &["and"],
    },
    BinaryLevel {
        symbols: &[
            SyntaxKind::EQ_EQ,
            SyntaxKind::NEQ,
            SyntaxKind::LT,
            SyntaxKind::LE,
            SyntaxKind::GT,
            SyntaxKind::GE,
        ],
        words: &[
            "eq",
            "ne",
            "lt",
            "le",
            "gt",
            "ge",
            "instanceof",
            "matches",
            "between",
        ],
    },
    BinaryLevel {
        symbols: &[SyntaxKind::PLUS, SyntaxKind::MINUS],
        words: &[],
    },
    BinaryLevel {
        symbols: &[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT],
        words: &["div", "mod"],
    },
    BinaryLevel {
        symbols: &[SyntaxKind::CARET],
        words: &[],
    },
];

fn at_operator(p: &Parser, level: &BinaryLevel) -> bool {
    p.at_any(level.symbols) || level.words.iter().any(|w| p.at_word(w))
}

// =============================================================================
// Expressions
// =============================================================================

fn expression(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    let checkpoint = p.checkpoint();
    conditional(p);
    if p.at(SyntaxKind::EQ) {
        p.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
        p.bump();
        expression(p);
        p.finish_node();
    }
    p.exit();
}

fn conditional(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    binary(p, 0);
    if p.at(SyntaxKind::QUESTION) {
        p.start_node_at(checkpoint, SyntaxKind::TERNARY_EXPR);
        p.bump();
        expression(p);
        p.expect(SyntaxKind::COLON, "':' in conditional expression");
        expression(p);
        p.finish_node();
    } else if p.at(SyntaxKind::ELVIS) {
        p.start_node_at(checkpoint, SyntaxKind::ELVIS_EXPR);
        p.bump();
        expression(p);
        p.finish_node();
    }
}

fn binary(p: &mut Parser, level: usize) {
    let Some(ops) = LEVELS.get(level) else {
        unary(p);
        return;
    };
    let checkpoint = p.checkpoint();
    binary(p, level + 1);
    while at_operator(p, ops) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        binary(p, level + 1);
        p.finish_node();
    }
}

fn unary(p: &mut Parser) {
    if p.at_any(&[SyntaxKind::BANG, SyntaxKind::MINUS, SyntaxKind::PLUS]) || p.at_word("not") {
        if !p.enter() {
            return;
        }
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        unary(p);
        p.finish_node();
        p.exit();
    } else {
        postfix(p);
    }
}

fn postfix(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    primary(p);
    loop {
        match p.current_kind() {
            SyntaxKind::DOT | SyntaxKind::SAFE_NAV => {
                let kind = if p.nth(2) == SyntaxKind::L_PAREN {
                    SyntaxKind::METHOD_CALL
                } else {
                    SyntaxKind::PROPERTY_REF
                };
                p.start_node_at(checkpoint, kind);
                p.bump();
                if p.at(SyntaxKind::IDENT) {
                    p.bump();
                    if kind == SyntaxKind::METHOD_CALL {
                        arguments(p);
                    }
                } else {
                    p.error("Expected a property or method name");
                }
                p.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                p.start_node_at(checkpoint, SyntaxKind::INDEXER);
                p.bump();
                expression(p);
                p.expect(SyntaxKind::R_BRACKET, "']'");
                p.finish_node();
            }
            SyntaxKind::SELECT_ALL
            | SyntaxKind::SELECT_FIRST
            | SyntaxKind::SELECT_LAST
            | SyntaxKind::PROJECTION => {
                p.start_node_at(checkpoint, SyntaxKind::SELECTION);
                p.bump();
                expression(p);
                p.expect(SyntaxKind::R_BRACKET, "']'");
                p.finish_node();
            }
            _ => break,
        }
    }
}

fn primary(p: &mut Parser) {
    match p.current_kind() {
        SyntaxKind::INTEGER
        | SyntaxKind::DECIMAL
        | SyntaxKind::STRING
        | SyntaxKind::PLACEHOLDER => literal(p),
        SyntaxKind::IDENT if ["true", "false", "null"].iter().any(|w| p.at_word(w)) => literal(p),
        SyntaxKind::IDENT if p.at_word("T") && p.nth(1) == SyntaxKind::L_PAREN => type_ref(p),
        SyntaxKind::IDENT if p.at_word("new") && p.nth(1) == SyntaxKind::IDENT => constructor(p),
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::METHOD_CALL);
            p.bump();
            arguments(p);
            p.finish_node();
        }
        SyntaxKind::IDENT => {
            p.start_node(SyntaxKind::PROPERTY_REF);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            expression(p);
            p.expect(SyntaxKind::R_PAREN, "')'");
            p.finish_node();
        }
        SyntaxKind::AT | SyntaxKind::AMP => {
            p.start_node(SyntaxKind::BEAN_REF);
            p.bump();
            if !p.eat(SyntaxKind::IDENT) && !p.eat(SyntaxKind::STRING) {
                p.error("Expected a bean name");
            }
            p.finish_node();
        }
        SyntaxKind::HASH => {
            p.start_node(SyntaxKind::VARIABLE_REF);
            p.bump();
            if p.expect(SyntaxKind::IDENT, "a variable name") && p.at(SyntaxKind::L_PAREN) {
                arguments(p);
            }
            p.finish_node();
        }
        SyntaxKind::L_BRACE => inline_collection(p),
        _ => {
            const RECOVERY: &[SyntaxKind] = &[
                SyntaxKind::R_PAREN,
                SyntaxKind::R_BRACKET,
                SyntaxKind::R_BRACE,
                SyntaxKind::COMMA,
                SyntaxKind::COLON,
            ];
            if p.at_eof() || p.at_any(RECOVERY) {
                p.error("Expected an expression");
            } else {
                let message = p.unexpected();
                p.error_recover(message, RECOVERY);
            }
        }
    }
}

fn literal(p: &mut Parser) {
    p.start_node(SyntaxKind::LITERAL);
    p.bump();
    p.finish_node();
}

fn qualified_name(p: &mut Parser) {
    if !p.expect(SyntaxKind::IDENT, "a type name") {
        return;
    }
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.bump();
        p.bump();
    }
}

fn type_ref(p: &mut Parser) {
    p.start_node(SyntaxKind::TYPE_REF);
    p.bump();
    p.bump();
    qualified_name(p);
    p.expect(SyntaxKind::R_PAREN, "')'");
    p.finish_node();
}

fn constructor(p: &mut Parser) {
    p.start_node(SyntaxKind::CONSTRUCTOR);
    p.bump();
    qualified_name(p);
    if p.at(SyntaxKind::L_PAREN) {
        arguments(p);
    } else if p.at(SyntaxKind::L_BRACKET) {
        while p.eat(SyntaxKind::L_BRACKET) {
            if !p.at(SyntaxKind::R_BRACKET) {
                expression(p);
            }
            p.expect(SyntaxKind::R_BRACKET, "']'");
        }
        if p.at(SyntaxKind::L_BRACE) {
            inline_collection(p);
        }
    } else {
        p.error("Expected '(' or '[' after the constructed type");
    }
    p.finish_node();
}

fn arguments(p: &mut Parser) {
    p.start_node(SyntaxKind::ARG_LIST);
    p.expect(SyntaxKind::L_PAREN, "'('");
    if !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        expression(p);
        while p.eat(SyntaxKind::COMMA) {
            expression(p);
        }
    }
    p.expect(SyntaxKind::R_PAREN, "')'");
    p.finish_node();
}

/// `{}`, `{:}`, `{1, 2}` or `{key: value, ...}`
fn inline_collection(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    p.bump();
    if p.at(SyntaxKind::COLON) && p.nth(1) == SyntaxKind::R_BRACE {
        p.start_node_at(checkpoint, SyntaxKind::INLINE_MAP);
        p.bump();
        p.bump();
        p.finish_node();
        return;
    }
    if p.at(SyntaxKind::R_BRACE) {
        p.start_node_at(checkpoint, SyntaxKind::INLINE_LIST);
        p.bump();
        p.finish_node();
        return;
    }

    // The first element decides between a list and a map
    expression(p);
    let is_map = p.at(SyntaxKind::COLON);
    let kind = if is_map {
        SyntaxKind::INLINE_MAP
    } else {
        SyntaxKind::INLINE_LIST
    };
    p.start_node_at(checkpoint, kind);
    if is_map {
        p.bump();
        expression(p);
    }
    while p.eat(SyntaxKind::COMMA) {
        expression(p);
        if is_map {
            p.expect(SyntaxKind::COLON, "':' in inline map");
            expression(p);
        }
    }
    p.expect(SyntaxKind::R_BRACE, "'}'");
    p.finish_node();
}
