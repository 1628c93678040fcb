//! Property placeholder bodies: `key(:default)?`
//!
//! The text is the inside of `${...}`, e.g. `server.ports[0].value:8080`.
//! Everything after the first `:` is the default value and is not parsed.

use logos::Logos;
use tokio_util::sync::CancellationToken;

use super::SyntaxKind;
use super::parser::{Parse, ParseError, Parser, lex};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[^.\[\]:\s]+")]
    Ident,

    #[token(".")]
    Dot,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[token(":", |lex| lex.bump(lex.remainder().len()))]
    Default,
}

impl From<PlaceholderToken> for SyntaxKind {
    fn from(token: PlaceholderToken) -> Self {
        match token {
            PlaceholderToken::Whitespace => SyntaxKind::WHITESPACE,
            PlaceholderToken::Ident => SyntaxKind::IDENT,
            PlaceholderToken::Dot => SyntaxKind::DOT,
            PlaceholderToken::LBracket => SyntaxKind::L_BRACKET,
            PlaceholderToken::RBracket => SyntaxKind::R_BRACKET,
            PlaceholderToken::Default => SyntaxKind::PLACEHOLDER_DEFAULT,
        }
    }
}

/// Parse a placeholder body into a `PLACEHOLDER_ROOT` tree
pub fn parse_placeholder(input: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
    let tokens = lex::<PlaceholderToken>(input);
    let mut p = Parser::new(&tokens, input, cancel);
    p.start_root(SyntaxKind::PLACEHOLDER_ROOT);
    key(&mut p);
    p.eat(SyntaxKind::PLACEHOLDER_DEFAULT);
    if !p.at_eof() {
        let message = p.unexpected();
        p.error_rest(message);
    }
    p.finish_root();
    p.finish()
}

fn key(p: &mut Parser) {
    if !p.at(SyntaxKind::IDENT) {
        p.error("Expected a property name");
        return;
    }
    p.start_node(SyntaxKind::PLACEHOLDER_KEY);
    p.bump();
    loop {
        match p.current_kind() {
            SyntaxKind::DOT => {
                p.bump();
                if !p.eat(SyntaxKind::IDENT) {
                    p.error("Expected a property name after '.'");
                }
            }
            SyntaxKind::L_BRACKET => {
                p.bump();
                if !p.eat(SyntaxKind::IDENT) {
                    p.error("Expected an index or key inside '[]'");
                }
                if !p.expect(SyntaxKind::R_BRACKET, "']'") {
                    break;
                }
            }
            _ => break,
        }
    }
    p.finish_node();
}
