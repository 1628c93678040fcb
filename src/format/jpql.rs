//! Token-level JPQL layout

use super::{FormatError, FormatOptions, QueryFormatter};
use crate::syntax::jpql::tokenize;
use crate::syntax::{SyntaxKind, Token};

/// Keywords that start a new line
const NEWLINE_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::SELECT_KW,
    SyntaxKind::FROM_KW,
    SyntaxKind::WHERE_KW,
    SyntaxKind::ORDER_KW,
    SyntaxKind::GROUP_KW,
    SyntaxKind::HAVING_KW,
    SyntaxKind::UPDATE_KW,
    SyntaxKind::DELETE_KW,
    SyntaxKind::SET_KW,
    SyntaxKind::JOIN_KW,
    SyntaxKind::LEFT_KW,
    SyntaxKind::INNER_KW,
];

/// Words outside the JPQL keyword set that also start a new line
const NEWLINE_WORDS: &[&str] = &["INSERT", "VALUES", "RIGHT"];

/// Puts each clause keyword on its own line
///
/// Tokens keep their source text (and casing). A token that was separated
/// from the previous one in the source gets a single space; adjacent tokens
/// stay adjacent. Every line starts with the configured indentation.
#[derive(Debug, Clone, Default)]
pub struct JpqlQueryFormatter {
    options: FormatOptions,
}

impl JpqlQueryFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

fn breaks_line(token: &Token) -> bool {
    NEWLINE_KEYWORDS.contains(&token.kind)
        || (token.kind == SyntaxKind::IDENT
            && NEWLINE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(token.text)))
}

impl QueryFormatter for JpqlQueryFormatter {
    fn name(&self) -> &'static str {
        "jpql"
    }

    fn try_format(&self, query: &str) -> Result<String, FormatError> {
        let tokens = tokenize(query);
        if let Some(bad) = tokens.iter().find(|t| t.kind == SyntaxKind::ERROR) {
            return Err(FormatError::Unrecognized {
                offset: bad.offset.into(),
                text: bad.text.to_string(),
            });
        }

        let indent = self.options.line_indent();
        let mut out = String::with_capacity(query.len() + indent.len() * 4);
        let mut prev: Option<&Token> = None;

        for token in tokens.iter().filter(|t| !t.kind.is_trivia()) {
            match prev {
                None => out.push_str(&indent),
                // `e.order` is a path, not a clause
                Some(p) if p.kind != SyntaxKind::DOT && breaks_line(token) => {
                    out.push('\n');
                    out.push_str(&indent);
                }
                Some(p) if token.offset > p.range().end() => out.push(' '),
                Some(_) => {}
            }
            out.push_str(token.text);
            prev = Some(token);
        }
        Ok(out)
    }
}
