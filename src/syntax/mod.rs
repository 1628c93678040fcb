//! Lexers and parsers for the embedded micro-languages
//!
//! Each language has a logos lexer and a recursive descent parser producing
//! a lossless rowan tree over the shared [`SyntaxKind`] set:
//!
//! ```text
//! region text → logos tokens → Parser → GreenNode → SyntaxNode
//! ```
//!
//! Parsers check a `CancellationToken` at every consumed token and give up
//! with [`ParseError`] when cancelled or nested too deeply.

pub mod cron;
pub mod jpql;
mod parser;
pub mod placeholder;
pub mod spel;
mod syntax_kind;

pub use parser::{MAX_NESTING, Parse, ParseError, SyntaxError, Token, lex};
pub use syntax_kind::{EmbeddedLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

pub use cron::parse_cron;
pub use jpql::parse_jpql;
pub use placeholder::parse_placeholder;
pub use spel::parse_spel;

#[cfg(test)]
mod tests;
