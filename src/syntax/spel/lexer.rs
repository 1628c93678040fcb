//! Logos lexer for Spring Expression Language
//!
//! Textual operators (`and`, `div`, `instanceof`, ...) and the literals
//! `true`, `false`, `null` lex as identifiers; the parser recognizes them by
//! spelling.

use logos::Logos;

use crate::syntax::SyntaxKind;

/// Consume the body of a `${...}` or `#{...}` region up to its balanced `}`
pub(crate) fn balanced_braces<'s, T>(lex: &mut logos::Lexer<'s, T>) -> bool
where
    T: Logos<'s, Source = str>,
{
    let mut depth = 1usize;
    for (i, c) in lex.remainder().char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpelToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[0-9]+[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F]+[lL]?")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9]+[fFdD]")]
    Decimal,

    #[regex(r"'([^']|'')*'")]
    #[regex(r#""([^"]|"")*""#)]
    String,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[token("${", balanced_braces)]
    Placeholder,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("#")]
    Hash,
    #[token("@")]
    At,
    #[token("&")]
    Amp,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("?.")]
    SafeNav,
    #[token("?:")]
    Elvis,
    #[token(".?[")]
    SelectAll,
    #[token(".^[")]
    SelectFirst,
    #[token(".$[")]
    SelectLast,
    #[token(".![")]
    Projection,
}

impl From<SpelToken> for SyntaxKind {
    fn from(token: SpelToken) -> Self {
        match token {
            SpelToken::Whitespace => SyntaxKind::WHITESPACE,
            SpelToken::Integer => SyntaxKind::INTEGER,
            SpelToken::Decimal => SyntaxKind::DECIMAL,
            SpelToken::String => SyntaxKind::STRING,
            SpelToken::Ident => SyntaxKind::IDENT,
            SpelToken::Placeholder => SyntaxKind::PLACEHOLDER,
            SpelToken::LParen => SyntaxKind::L_PAREN,
            SpelToken::RParen => SyntaxKind::R_PAREN,
            SpelToken::LBracket => SyntaxKind::L_BRACKET,
            SpelToken::RBracket => SyntaxKind::R_BRACKET,
            SpelToken::LBrace => SyntaxKind::L_BRACE,
            SpelToken::RBrace => SyntaxKind::R_BRACE,
            SpelToken::Comma => SyntaxKind::COMMA,
            SpelToken::Dot => SyntaxKind::DOT,
            SpelToken::Colon => SyntaxKind::COLON,
            SpelToken::Question => SyntaxKind::QUESTION,
            SpelToken::Star => SyntaxKind::STAR,
            SpelToken::Slash => SyntaxKind::SLASH,
            SpelToken::Plus => SyntaxKind::PLUS,
            SpelToken::Minus => SyntaxKind::MINUS,
            SpelToken::Percent => SyntaxKind::PERCENT,
            SpelToken::Caret => SyntaxKind::CARET,
            SpelToken::Hash => SyntaxKind::HASH,
            SpelToken::At => SyntaxKind::AT,
            SpelToken::Amp => SyntaxKind::AMP,
            SpelToken::Bang => SyntaxKind::BANG,
            SpelToken::Eq => SyntaxKind::EQ,
            SpelToken::EqEq => SyntaxKind::EQ_EQ,
            SpelToken::Neq => SyntaxKind::NEQ,
            SpelToken::Lt => SyntaxKind::LT,
            SpelToken::Le => SyntaxKind::LE,
            SpelToken::Gt => SyntaxKind::GT,
            SpelToken::Ge => SyntaxKind::GE,
            SpelToken::AmpAmp => SyntaxKind::AMP_AMP,
            SpelToken::PipePipe => SyntaxKind::PIPE_PIPE,
            SpelToken::SafeNav => SyntaxKind::SAFE_NAV,
            SpelToken::Elvis => SyntaxKind::ELVIS,
            SpelToken::SelectAll => SyntaxKind::SELECT_ALL,
            SpelToken::SelectFirst => SyntaxKind::SELECT_FIRST,
            SpelToken::SelectLast => SyntaxKind::SELECT_LAST,
            SpelToken::Projection => SyntaxKind::PROJECTION,
        }
    }
}
