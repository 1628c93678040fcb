//! Finding embedded-language regions in Java-like source
//!
//! [`AnnotationRegionLocator`] lexes the source (no parsing beyond annotation
//! argument lists) and picks out string literals passed to annotations whose
//! attributes carry cron expressions, SpEL, property placeholders or JPQL.

use std::fmt;
use std::ops::Range;

use logos::Logos;
use text_size::{TextRange, TextSize};
use tracing::debug;

/// Language of an embedded region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionLanguage {
    Cron,
    Spel,
    Placeholder,
    Jpql,
}

impl RegionLanguage {
    pub const ALL: [RegionLanguage; 4] = [
        RegionLanguage::Cron,
        RegionLanguage::Spel,
        RegionLanguage::Placeholder,
        RegionLanguage::Jpql,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RegionLanguage::Cron => "cron",
            RegionLanguage::Spel => "spel",
            RegionLanguage::Placeholder => "placeholder",
            RegionLanguage::Jpql => "jpql",
        }
    }
}

impl fmt::Display for RegionLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A span of a document holding text in one embedded language
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedRegion {
    pub language: RegionLanguage,
    /// Absolute range of the region content, without delimiters
    pub range: TextRange,
}

impl EmbeddedRegion {
    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.range]
    }
}

/// Finds embedded regions in a document
pub trait RegionLocator: Send + Sync {
    fn locate(&self, source: &str) -> Vec<EmbeddedRegion>;
}

// ============================================================================
// LEXER
// ============================================================================

/// Skip to the closing `"""` of a text block
fn text_block(lex: &mut logos::Lexer<JavaToken>) -> bool {
    match lex.remainder().find("\"\"\"") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum JavaToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("\"\"\"", text_block)]
    TextBlock,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
}

/// A significant token; `None` for input the lexer does not know
#[derive(Clone, Debug)]
struct Lexeme {
    kind: Option<JavaToken>,
    span: Range<usize>,
}

fn lex_significant(source: &str) -> Vec<Lexeme> {
    let mut lexer = JavaToken::lexer(source);
    let mut lexemes = Vec::new();
    while let Some(result) = lexer.next() {
        let kind = result.ok();
        if matches!(
            kind,
            Some(JavaToken::Whitespace | JavaToken::LineComment | JavaToken::BlockComment)
        ) {
            continue;
        }
        lexemes.push(Lexeme {
            kind,
            span: lexer.span(),
        });
    }
    lexemes
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

/// One `name = value` pair of an annotation; unnamed values are `value`
struct Element<'t> {
    name: &'t str,
    value: &'t [Lexeme],
}

/// Where a string attribute's content goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Language(RegionLanguage),
    /// Literal text with `#{...}` SpEL and `${...}` placeholder parts
    Template,
}

/// Locates regions in annotation attributes
///
/// Recognized attributes:
///
/// | Annotation | Attributes | Language |
/// |---|---|---|
/// | `@Scheduled` | `cron` | cron |
/// | `@Value`, `@ConditionalOnExpression` | `value` | template |
/// | `@Query` (unless `nativeQuery = true`) | `value`, `countQuery` | JPQL |
/// | `@PreAuthorize`, `@PostAuthorize`, `@PreFilter`, `@PostFilter` | `value` | SpEL |
/// | `@EventListener`, `@TransactionalEventListener` | `condition` | SpEL |
/// | `@Cacheable`, `@CachePut`, `@CacheEvict` | `key`, `condition`, `unless` | SpEL |
///
/// Only plain string literals are used. Literals with escape sequences,
/// text blocks and concatenations are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnotationRegionLocator;

impl AnnotationRegionLocator {
    fn target(annotation: &str, attribute: &str, native_query: bool) -> Option<Target> {
        let target = match (annotation, attribute) {
            ("Scheduled", "cron") => Target::Language(RegionLanguage::Cron),
            ("Value" | "ConditionalOnExpression", "value") => Target::Template,
            ("Query", "value" | "countQuery") if !native_query => {
                Target::Language(RegionLanguage::Jpql)
            }
            ("PreAuthorize" | "PostAuthorize" | "PreFilter" | "PostFilter", "value") => {
                Target::Language(RegionLanguage::Spel)
            }
            ("EventListener" | "TransactionalEventListener", "condition") => {
                Target::Language(RegionLanguage::Spel)
            }
            ("Cacheable" | "CachePut" | "CacheEvict", "key" | "condition" | "unless") => {
                Target::Language(RegionLanguage::Spel)
            }
            _ => return None,
        };
        Some(target)
    }
}

impl RegionLocator for AnnotationRegionLocator {
    fn locate(&self, source: &str) -> Vec<EmbeddedRegion> {
        let lexemes = lex_significant(source);
        let kind_at = |i: usize| lexemes.get(i).and_then(|l| l.kind);

        let mut regions = Vec::new();
        let mut i = 0;
        while i < lexemes.len() {
            if kind_at(i) != Some(JavaToken::At) || kind_at(i + 1) != Some(JavaToken::Ident) {
                i += 1;
                continue;
            }

            // @a.b.Name: the simple name is the last segment
            let mut name_at = i + 1;
            while kind_at(name_at + 1) == Some(JavaToken::Dot)
                && kind_at(name_at + 2) == Some(JavaToken::Ident)
            {
                name_at += 2;
            }
            if kind_at(name_at + 1) != Some(JavaToken::LParen) {
                i = name_at + 1;
                continue;
            }

            let annotation = &source[lexemes[name_at].span.clone()];
            let (elements, next) = annotation_elements(&lexemes, name_at + 2, source);
            let native_query = elements.iter().any(|e| {
                e.name == "nativeQuery"
                    && matches!(e.value, [l] if &source[l.span.clone()] == "true")
            });

            for element in &elements {
                let Some(target) = Self::target(annotation, element.name, native_query) else {
                    continue;
                };
                let Some(content) = string_content(element.value, source) else {
                    debug!(annotation, attribute = element.name, "skipping non-literal value");
                    continue;
                };
                push_regions(target, content, source, &mut regions);
            }
            i = next;
        }
        regions
    }
}

/// Split an argument list starting after `(` into elements
///
/// Returns the elements and the index after the closing `)`.
fn annotation_elements<'t>(
    lexemes: &'t [Lexeme],
    start: usize,
    source: &'t str,
) -> (Vec<Element<'t>>, usize) {
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut element_start = start;
    let mut i = start;

    while i < lexemes.len() {
        match lexemes[i].kind {
            Some(JavaToken::LParen | JavaToken::LBrace) => depth += 1,
            Some(JavaToken::RParen | JavaToken::RBrace) if depth > 0 => depth -= 1,
            Some(JavaToken::RParen) => {
                elements.extend(element(&lexemes[element_start..i], source));
                return (elements, i + 1);
            }
            Some(JavaToken::Comma) if depth == 0 => {
                elements.extend(element(&lexemes[element_start..i], source));
                element_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    // Unterminated argument list: keep what was complete
    (elements, i)
}

fn element<'t>(value: &'t [Lexeme], source: &'t str) -> Option<Element<'t>> {
    match value {
        [] => None,
        [name, eq, rest @ ..]
            if name.kind == Some(JavaToken::Ident) && eq.kind == Some(JavaToken::Eq) =>
        {
            Some(Element {
                name: &source[name.span.clone()],
                value: rest,
            })
        }
        _ => Some(Element {
            name: "value",
            value,
        }),
    }
}

/// Content range of a value that is exactly one plain string literal
fn string_content(value: &[Lexeme], source: &str) -> Option<Range<usize>> {
    let [literal] = value else {
        return None;
    };
    if literal.kind != Some(JavaToken::String) {
        return None;
    }
    let content = literal.span.start + 1..literal.span.end - 1;
    if source[content.clone()].contains('\\') {
        return None;
    }
    Some(content)
}

fn text_range(range: Range<usize>) -> TextRange {
    TextRange::new(TextSize::new(range.start as u32), TextSize::new(range.end as u32))
}

fn push_regions(
    target: Target,
    content: Range<usize>,
    source: &str,
    regions: &mut Vec<EmbeddedRegion>,
) {
    let text = &source[content.clone()];
    let target = match target {
        // Cron expressions are often externalized: "${app.cron}"
        Target::Language(RegionLanguage::Cron) if text.contains("${") || text.contains("#{") => {
            Target::Template
        }
        other => other,
    };

    match target {
        Target::Language(language) => regions.push(EmbeddedRegion {
            language,
            range: text_range(content),
        }),
        Target::Template => {
            for (language, inner) in template_parts(text) {
                regions.push(EmbeddedRegion {
                    language,
                    range: text_range(content.start + inner.start..content.start + inner.end),
                });
            }
        }
    }
}

/// `#{...}` and `${...}` parts of a template, as content ranges within `text`
pub(crate) fn template_parts(text: &str) -> Vec<(RegionLanguage, Range<usize>)> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        let language = match (bytes[i], bytes[i + 1]) {
            (b'#', b'{') => RegionLanguage::Spel,
            (b'$', b'{') => RegionLanguage::Placeholder,
            _ => {
                i += 1;
                continue;
            }
        };
        let open = i + 2;
        let mut depth = 1usize;
        let mut close = None;
        for (j, &b) in bytes.iter().enumerate().skip(open) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(j);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            // Unterminated: nothing further can be delimited
            break;
        };
        parts.push((language, open..close));
        i = close + 1;
    }
    parts
}
