//! Recursive descent machinery shared by the embedded-language parsers
//!
//! Builds a rowan GreenNode tree from tokens. Trivia is attached lazily:
//! whitespace is flushed into the tree right before the next significant
//! token or node start, so nodes never begin with whitespace.
//!
//! Tokens the lexer could not recognize are reported once, up front, and are
//! otherwise skipped like trivia: the grammar never sees them.

use logos::Logos;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::{SyntaxKind, SyntaxNode};

/// Maximum recursion depth of a grammar rule chain before parsing gives up
pub const MAX_NESTING: usize = 96;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Tokenize `input` with the logos lexer `T`, mapping lexer failures to
/// [`SyntaxKind::ERROR`] tokens.
pub fn lex<'a, T>(input: &'a str) -> Vec<Token<'a>>
where
    T: Logos<'a, Source = str> + Into<SyntaxKind>,
    T::Extras: Default,
{
    let mut lexer = T::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(token) => token.into(),
            Err(_) => SyntaxKind::ERROR,
        };
        tokens.push(Token {
            kind,
            text: &input[span.clone()],
            offset: TextSize::new(span.start as u32),
        });
    }
    tokens
}

/// Reasons a parse is abandoned without producing a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("parsing was cancelled")]
    Cancelled,
    #[error("nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
    /// Raised by the lexer for input it has no token for
    pub unrecognized: bool,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
            unrecognized: false,
        }
    }

    pub fn unrecognized(text: &str, range: TextRange) -> Self {
        Self {
            message: format!("Unrecognized token '{text}'"),
            range,
            unrecognized: true,
        }
    }
}

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The parser state
pub(crate) struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    cancel: &'t CancellationToken,
    depth: usize,
    aborted: Option<ParseError>,
    last_end: TextSize,
    end: TextSize,
}

fn skipped(kind: SyntaxKind) -> bool {
    kind.is_trivia() || kind == SyntaxKind::ERROR
}

impl<'t, 'a> Parser<'t, 'a> {
    pub(crate) fn new(tokens: &'t [Token<'a>], input: &str, cancel: &'t CancellationToken) -> Self {
        let errors = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::ERROR)
            .map(|t| SyntaxError::unrecognized(t.text, t.range()))
            .collect();
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors,
            cancel,
            depth: 0,
            aborted: None,
            last_end: TextSize::new(0),
            end: TextSize::of(input),
        }
    }

    pub(crate) fn finish(self) -> Result<Parse, ParseError> {
        if let Some(abort) = self.aborted {
            return Err(abort);
        }
        let mut errors = self.errors;
        errors.sort_by_key(|e| (e.range.start(), e.range.len()));
        Ok(Parse {
            green: self.builder.finish(),
            errors,
        })
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn significant(&self, n: usize) -> Option<&Token<'a>> {
        if self.aborted.is_some() {
            return None;
        }
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !skipped(t.kind))
            .nth(n)
    }

    pub(crate) fn current(&self) -> Option<&Token<'a>> {
        self.significant(0)
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    /// Look ahead `n` significant tokens
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.significant(n).map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    /// Current token is an identifier spelled `word` (ASCII case-insensitive)
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.current()
            .is_some_and(|t| t.kind == SyntaxKind::IDENT && t.text.eq_ignore_ascii_case(word))
    }

    /// Whether whitespace separates the current significant token from the previous one
    pub(crate) fn at_trivia_boundary(&self) -> bool {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|t| skipped(t.kind))
            .any(|t| t.kind.is_trivia())
    }

    /// End offset of the last consumed significant token
    pub(crate) fn last_end(&self) -> TextSize {
        self.last_end
    }

    /// Message naming the current token, for "unexpected input" errors
    pub(crate) fn unexpected(&self) -> String {
        match self.current() {
            Some(token) => format!("Unexpected '{}'", token.text),
            None => "Unexpected end of input".to_string(),
        }
    }

    pub(crate) fn current_range(&self) -> TextRange {
        self.current()
            .map(Token::range)
            .unwrap_or_else(|| TextRange::empty(self.end))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !skipped(token.kind) {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(crate) fn bump(&mut self) {
        if self.aborted.is_some() {
            return;
        }
        if self.cancel.is_cancelled() {
            self.aborted = Some(ParseError::Cancelled);
            return;
        }
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.last_end = token.range().end();
            self.pos += 1;
        }
    }

    /// Consume the current token as `kind`, keeping its text
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) {
        if self.aborted.is_some() {
            return;
        }
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.last_end = token.range().end();
            self.pos += 1;
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("Expected {what}"));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Report an error at the current token, or at the end of input
    ///
    /// Only the first error reported at a position is kept.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        if self.aborted.is_some() {
            return;
        }
        let range = self.current_range();
        if self
            .errors
            .last()
            .is_some_and(|last| last.range.start() == range.start())
        {
            return;
        }
        self.errors.push(SyntaxError::new(message, range));
    }

    pub(crate) fn error_at(&mut self, range: TextRange, message: impl Into<String>) {
        if self.aborted.is_none() {
            self.errors.push(SyntaxError::new(message, range));
        }
    }

    pub(crate) fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        // Always make progress
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    /// Wrap every remaining token in an ERROR node after reporting `message`
    pub(crate) fn error_rest(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        while !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Open the root node; leading trivia belongs inside it
    pub(crate) fn start_root(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Flush trailing trivia and close the root node
    pub(crate) fn finish_root(&mut self) {
        self.flush_trivia();
        // Tokens left over after an abort still belong to the tree
        while self.pos < self.tokens.len() {
            let token = &self.tokens[self.pos];
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter a recursive rule. Returns false (and aborts) once nesting is too deep.
    pub(crate) fn enter(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            if self.aborted.is_none() {
                self.aborted = Some(ParseError::NestingTooDeep(MAX_NESTING));
            }
            return false;
        }
        true
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
