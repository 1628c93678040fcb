//! JPQL queries as written in `@Query` annotations
//!
//! SELECT, UPDATE and DELETE statements with joins, conditions, grouping,
//! ordering, subqueries, `CASE` and function calls. Parameters may be
//! named (`:name`), positional (`?1`) or SpEL regions (`:#{...}`).

mod lexer;

pub use lexer::JpqlToken;

use tokio_util::sync::CancellationToken;

use super::SyntaxKind;
use super::parser::{Parse, ParseError, Parser, Token, lex};

/// Tokenize a query, including whitespace and unrecognized input
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lex::<JpqlToken>(input)
}

/// Parse a query into a `JPQL_ROOT` tree
pub fn parse_jpql(input: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
    let tokens = tokenize(input);
    let mut p = Parser::new(&tokens, input, cancel);
    p.start_root(SyntaxKind::JPQL_ROOT);
    statement(&mut p);
    if !p.at_eof() {
        let message = p.unexpected();
        p.error_rest(message);
    }
    p.finish_root();
    p.finish()
}

const COMPARISON: &[SyntaxKind] = &[
    SyntaxKind::EQ,
    SyntaxKind::NEQ,
    SyntaxKind::LT,
    SyntaxKind::LE,
    SyntaxKind::GT,
    SyntaxKind::GE,
];

/// Tokens that end the current clause
const CLAUSE_START: &[SyntaxKind] = &[
    SyntaxKind::FROM_KW,
    SyntaxKind::WHERE_KW,
    SyntaxKind::GROUP_KW,
    SyntaxKind::HAVING_KW,
    SyntaxKind::ORDER_KW,
    SyntaxKind::SET_KW,
    SyntaxKind::R_PAREN,
];

// =============================================================================
// Statements
// =============================================================================

fn statement(p: &mut Parser) {
    match p.current_kind() {
        SyntaxKind::SELECT_KW | SyntaxKind::FROM_KW => {
            select_statement(p, SyntaxKind::SELECT_STATEMENT)
        }
        SyntaxKind::UPDATE_KW => update_statement(p),
        SyntaxKind::DELETE_KW => delete_statement(p),
        SyntaxKind::EOF => p.error("Expected a query"),
        _ => {
            let message = format!("{}: expected SELECT, UPDATE or DELETE", p.unexpected());
            p.error_rest(message);
        }
    }
}

fn select_statement(p: &mut Parser, kind: SyntaxKind) {
    p.start_node(kind);
    if p.at(SyntaxKind::SELECT_KW) {
        select_clause(p);
    }
    if p.at(SyntaxKind::FROM_KW) {
        from_clause(p);
    } else {
        p.error("Expected FROM clause");
    }
    if p.at(SyntaxKind::WHERE_KW) {
        where_clause(p);
    }
    if p.at(SyntaxKind::GROUP_KW) {
        p.start_node(SyntaxKind::GROUP_BY_CLAUSE);
        p.bump();
        p.expect(SyntaxKind::BY_KW, "BY");
        expression_list(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::HAVING_KW) {
        p.start_node(SyntaxKind::HAVING_CLAUSE);
        p.bump();
        condition(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::ORDER_KW) {
        order_by_clause(p);
    }
    p.finish_node();
}

fn update_statement(p: &mut Parser) {
    p.start_node(SyntaxKind::UPDATE_STATEMENT);
    p.bump();
    range_declaration(p);
    if p.at(SyntaxKind::SET_KW) {
        p.start_node(SyntaxKind::SET_CLAUSE);
        p.bump();
        loop {
            path(p);
            p.expect(SyntaxKind::EQ, "'='");
            expression(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.finish_node();
    } else {
        p.error("Expected SET clause");
    }
    if p.at(SyntaxKind::WHERE_KW) {
        where_clause(p);
    }
    p.finish_node();
}

fn delete_statement(p: &mut Parser) {
    p.start_node(SyntaxKind::DELETE_STATEMENT);
    p.bump();
    p.eat(SyntaxKind::FROM_KW);
    range_declaration(p);
    if p.at(SyntaxKind::WHERE_KW) {
        where_clause(p);
    }
    p.finish_node();
}

// =============================================================================
// Clauses
// =============================================================================

fn select_clause(p: &mut Parser) {
    p.start_node(SyntaxKind::SELECT_CLAUSE);
    p.bump();
    p.eat(SyntaxKind::DISTINCT_KW);
    loop {
        select_item(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

fn select_item(p: &mut Parser) {
    if p.at(SyntaxKind::NEW_KW) {
        p.start_node(SyntaxKind::FUNCTION_CALL);
        p.bump();
        path(p);
        arguments(p);
        p.finish_node();
    } else {
        expression(p);
    }
    alias(p);
}

fn alias(p: &mut Parser) {
    if p.eat(SyntaxKind::AS_KW) {
        p.expect(SyntaxKind::IDENT, "an alias");
    } else {
        p.eat(SyntaxKind::IDENT);
    }
}

fn from_clause(p: &mut Parser) {
    p.start_node(SyntaxKind::FROM_CLAUSE);
    p.bump();
    range_declaration(p);
    loop {
        if p.eat(SyntaxKind::COMMA) {
            range_declaration(p);
        } else if p.at_any(&[SyntaxKind::JOIN_KW, SyntaxKind::LEFT_KW, SyntaxKind::INNER_KW])
            || p.at_word("right")
        {
            join(p);
        } else {
            break;
        }
    }
    p.finish_node();
}

fn range_declaration(p: &mut Parser) {
    p.start_node(SyntaxKind::RANGE_DECL);
    path(p);
    alias(p);
    p.finish_node();
}

fn join(p: &mut Parser) {
    p.start_node(SyntaxKind::JOIN);
    if p.at(SyntaxKind::LEFT_KW) || p.at_word("right") {
        p.bump();
        p.eat(SyntaxKind::OUTER_KW);
    } else {
        p.eat(SyntaxKind::INNER_KW);
    }
    p.expect(SyntaxKind::JOIN_KW, "JOIN");
    p.eat(SyntaxKind::FETCH_KW);
    path(p);
    alias(p);
    if p.eat(SyntaxKind::ON_KW) {
        condition(p);
    }
    p.finish_node();
}

fn where_clause(p: &mut Parser) {
    p.start_node(SyntaxKind::WHERE_CLAUSE);
    p.bump();
    condition(p);
    p.finish_node();
}

fn order_by_clause(p: &mut Parser) {
    p.start_node(SyntaxKind::ORDER_BY_CLAUSE);
    p.bump();
    p.expect(SyntaxKind::BY_KW, "BY");
    loop {
        expression(p);
        if !p.eat(SyntaxKind::ASC_KW) {
            p.eat(SyntaxKind::DESC_KW);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

fn expression_list(p: &mut Parser) {
    loop {
        expression(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

fn subquery(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    select_statement(p, SyntaxKind::SUBQUERY);
    p.exit();
}

// =============================================================================
// Conditions
// =============================================================================

fn condition(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    let checkpoint = p.checkpoint();
    conjunction(p);
    while p.at(SyntaxKind::OR_KW) {
        p.start_node_at(checkpoint, SyntaxKind::CONDITION);
        p.bump();
        conjunction(p);
        p.finish_node();
    }
    p.exit();
}

fn conjunction(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    negation(p);
    while p.at(SyntaxKind::AND_KW) {
        p.start_node_at(checkpoint, SyntaxKind::CONDITION);
        p.bump();
        negation(p);
        p.finish_node();
    }
}

fn negation(p: &mut Parser) {
    if p.at(SyntaxKind::NOT_KW) {
        if !p.enter() {
            return;
        }
        p.start_node(SyntaxKind::CONDITION);
        p.bump();
        negation(p);
        p.finish_node();
        p.exit();
    } else {
        predicate(p);
    }
}

fn predicate(p: &mut Parser) {
    if p.at(SyntaxKind::EXISTS_KW) {
        p.start_node(SyntaxKind::PREDICATE);
        p.bump();
        parenthesized_subquery(p);
        p.finish_node();
        return;
    }

    let checkpoint = p.checkpoint();
    expression(p);

    let negated = p.at(SyntaxKind::NOT_KW)
        && matches!(
            p.nth(1),
            SyntaxKind::BETWEEN_KW | SyntaxKind::LIKE_KW | SyntaxKind::IN_KW | SyntaxKind::MEMBER_KW
        );
    let operator = if negated { p.nth(1) } else { p.current_kind() };

    match operator {
        kind if COMPARISON.contains(&kind) => {
            p.start_node_at(checkpoint, SyntaxKind::PREDICATE);
            p.bump();
            // ALL/ANY/SOME (subquery)
            if p.at(SyntaxKind::IDENT)
                && p.nth(1) == SyntaxKind::L_PAREN
                && p.nth(2) == SyntaxKind::SELECT_KW
            {
                p.bump();
                parenthesized_subquery(p);
            } else {
                expression(p);
            }
            p.finish_node();
        }
        SyntaxKind::BETWEEN_KW => {
            p.start_node_at(checkpoint, SyntaxKind::PREDICATE);
            p.eat(SyntaxKind::NOT_KW);
            p.bump();
            expression(p);
            p.expect(SyntaxKind::AND_KW, "AND");
            expression(p);
            p.finish_node();
        }
        SyntaxKind::LIKE_KW => {
            p.start_node_at(checkpoint, SyntaxKind::PREDICATE);
            p.eat(SyntaxKind::NOT_KW);
            p.bump();
            expression(p);
            if p.eat(SyntaxKind::ESCAPE_KW) {
                expression(p);
            }
            p.finish_node();
        }
        SyntaxKind::IN_KW => {
            p.start_node_at(checkpoint, SyntaxKind::PREDICATE);
            p.eat(SyntaxKind::NOT_KW);
            p.bump();
            if p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::SELECT_KW {
                parenthesized_subquery(p);
            } else if p.eat(SyntaxKind::L_PAREN) {
                expression_list(p);
                p.expect(SyntaxKind::R_PAREN, "')'");
            } else {
                expression(p);
            }
            p.finish_node();
        }
        SyntaxKind::MEMBER_KW => {
            p.start_node_at(checkpoint, SyntaxKind::PREDICATE);
            p.eat(SyntaxKind::NOT_KW);
            p.bump();
            p.eat(SyntaxKind::OF_KW);
            path(p);
            p.finish_node();
        }
        SyntaxKind::IS_KW => {
            p.start_node_at(checkpoint, SyntaxKind::PREDICATE);
            p.bump();
            p.eat(SyntaxKind::NOT_KW);
            if !p.eat(SyntaxKind::NULL_KW) && !p.eat(SyntaxKind::EMPTY_KW) {
                p.error("Expected NULL or EMPTY");
            }
            p.finish_node();
        }
        _ => {}
    }
}

fn parenthesized_subquery(p: &mut Parser) {
    p.expect(SyntaxKind::L_PAREN, "'('");
    if p.at(SyntaxKind::SELECT_KW) {
        subquery(p);
    } else {
        p.error("Expected a subquery");
    }
    p.expect(SyntaxKind::R_PAREN, "')'");
}

// =============================================================================
// Expressions
// =============================================================================

fn expression(p: &mut Parser) {
    if !p.enter() {
        return;
    }
    let checkpoint = p.checkpoint();
    term(p);
    while p.at_any(&[SyntaxKind::PLUS, SyntaxKind::MINUS, SyntaxKind::PIPE_PIPE]) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        term(p);
        p.finish_node();
    }
    p.exit();
}

fn term(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    unary(p);
    while p.at_any(&[SyntaxKind::STAR, SyntaxKind::SLASH]) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        unary(p);
        p.finish_node();
    }
}

fn unary(p: &mut Parser) {
    if p.at_any(&[SyntaxKind::PLUS, SyntaxKind::MINUS]) {
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        primary(p);
        p.finish_node();
    } else {
        primary(p);
    }
}

fn primary(p: &mut Parser) {
    match p.current_kind() {
        SyntaxKind::INTEGER
        | SyntaxKind::DECIMAL
        | SyntaxKind::STRING
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW
        | SyntaxKind::NAMED_PARAM
        | SyntaxKind::POSITIONAL_PARAM
        | SyntaxKind::SPEL_REGION => {
            p.start_node(SyntaxKind::LITERAL);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::L_PAREN if p.nth(1) == SyntaxKind::SELECT_KW => parenthesized_subquery(p),
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            condition(p);
            p.expect(SyntaxKind::R_PAREN, "')'");
            p.finish_node();
        }
        SyntaxKind::CASE_KW => case_expression(p),
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::FUNCTION_CALL);
            p.bump();
            arguments(p);
            p.finish_node();
        }
        SyntaxKind::IDENT => path(p),
        _ => {
            let mut recovery = CLAUSE_START.to_vec();
            recovery.extend([SyntaxKind::COMMA, SyntaxKind::AND_KW, SyntaxKind::OR_KW]);
            if p.at_eof() || p.at_any(&recovery) {
                p.error("Expected an expression");
            } else {
                let message = p.unexpected();
                p.error_recover(message, &recovery);
            }
        }
    }
}

/// `(DISTINCT? arg, ...)`, also `(*)` for `count(*)`
fn arguments(p: &mut Parser) {
    p.start_node(SyntaxKind::ARG_LIST);
    p.expect(SyntaxKind::L_PAREN, "'('");
    if p.at(SyntaxKind::STAR) {
        p.bump();
    } else if !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        p.eat(SyntaxKind::DISTINCT_KW);
        loop {
            condition(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN, "')'");
    p.finish_node();
}

fn case_expression(p: &mut Parser) {
    p.start_node(SyntaxKind::CASE_EXPR);
    p.bump();
    if !p.at(SyntaxKind::WHEN_KW) {
        expression(p);
    }
    if !p.at(SyntaxKind::WHEN_KW) {
        p.error("Expected WHEN");
    }
    while p.eat(SyntaxKind::WHEN_KW) {
        condition(p);
        p.expect(SyntaxKind::THEN_KW, "THEN");
        expression(p);
    }
    if p.eat(SyntaxKind::ELSE_KW) {
        expression(p);
    }
    p.expect(SyntaxKind::END_KW, "END");
    p.finish_node();
}

/// A dotted path; keywords are plain names after a dot (`e.order`)
fn path(p: &mut Parser) {
    p.start_node(SyntaxKind::PATH);
    p.expect(SyntaxKind::IDENT, "an identifier");
    while p.at(SyntaxKind::DOT) && (p.nth(1) == SyntaxKind::IDENT || p.nth(1).is_keyword()) {
        p.bump();
        p.bump_as(SyntaxKind::IDENT);
    }
    p.finish_node();
}
