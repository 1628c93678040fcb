//! Syntax kinds for the Rowan-based CSTs of the embedded languages
//!
//! One enum covers every micro-language (cron, SpEL, property placeholders,
//! JPQL). Each lexer maps its own logos token type into this enum, so all
//! grammars share one rowan `Language` and one set of tree utilities.

/// All syntax kinds (tokens and nodes) of the embedded languages
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (cron fields, SpEL expressions, JPQL clauses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier, also cron names like MON or L
    INTEGER, // 42
    DECIMAL, // 3.14
    STRING,  // 'hello' or "hello"

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    L_PAREN,       // (
    R_PAREN,       // )
    L_BRACKET,     // [
    R_BRACKET,     // ]
    L_BRACE,       // {
    R_BRACE,       // }
    COMMA,         // ,
    DOT,           // .
    COLON,         // :
    QUESTION,      // ?
    STAR,          // *
    SLASH,         // /
    PLUS,          // +
    MINUS,         // -
    PERCENT,       // %
    CARET,         // ^
    HASH,          // #
    AT,            // @
    AMP,           // &
    BANG,          // !
    EQ,            // =
    EQ_EQ,         // ==
    NEQ,           // != or <>
    LT,            // <
    LE,            // <=
    GT,            // >
    GE,            // >=
    AMP_AMP,       // &&
    PIPE_PIPE,     // ||
    SAFE_NAV,      // ?.
    ELVIS,         // ?:
    SELECT_ALL,    // .?[
    SELECT_FIRST,  // .^[
    SELECT_LAST,   // .$[
    PROJECTION,    // .![

    // =========================================================================
    // EMBEDDED REGIONS AND PARAMETERS
    // =========================================================================
    CRON_MACRO,          // @daily
    PLACEHOLDER,         // ${key:default}
    PLACEHOLDER_DEFAULT, // :default (rest of a placeholder body)
    SPEL_REGION,         // :#{expr} or ?#{expr}
    NAMED_PARAM,         // :name
    POSITIONAL_PARAM,    // ?1

    // =========================================================================
    // JPQL KEYWORDS
    // =========================================================================
    SELECT_KW,
    FROM_KW,
    WHERE_KW,
    ORDER_KW,
    GROUP_KW,
    BY_KW,
    HAVING_KW,
    UPDATE_KW,
    DELETE_KW,
    SET_KW,
    JOIN_KW,
    LEFT_KW,
    INNER_KW,
    OUTER_KW,
    FETCH_KW,
    ON_KW,
    AS_KW,
    AND_KW,
    OR_KW,
    NOT_KW,
    IN_KW,
    IS_KW,
    NULL_KW,
    LIKE_KW,
    ESCAPE_KW,
    BETWEEN_KW,
    DISTINCT_KW,
    ASC_KW,
    DESC_KW,
    EMPTY_KW,
    MEMBER_KW,
    OF_KW,
    EXISTS_KW,
    TRUE_KW,
    FALSE_KW,
    NEW_KW,
    CASE_KW,
    WHEN_KW,
    THEN_KW,
    ELSE_KW,
    END_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Unrecognized token, or a node wrapping tokens skipped during recovery
    ERROR,
    /// Sentinel returned when peeking past the end; never stored in a tree
    EOF,

    // =========================================================================
    // NODES: CRON
    // =========================================================================
    CRON_EXPR,
    CRON_FIELD,
    CRON_ITEM,

    // =========================================================================
    // NODES: PROPERTY PLACEHOLDER
    // =========================================================================
    PLACEHOLDER_ROOT,
    PLACEHOLDER_KEY,

    // =========================================================================
    // NODES: SPEL
    // =========================================================================
    SPEL_ROOT,
    LITERAL,
    PAREN_EXPR,
    BINARY_EXPR,
    UNARY_EXPR,
    TERNARY_EXPR,
    ELVIS_EXPR,
    ASSIGN_EXPR,
    METHOD_CALL,
    PROPERTY_REF,
    INDEXER,
    SELECTION,
    TYPE_REF,
    BEAN_REF,
    VARIABLE_REF,
    CONSTRUCTOR,
    INLINE_LIST,
    INLINE_MAP,
    ARG_LIST,

    // =========================================================================
    // NODES: JPQL
    // =========================================================================
    JPQL_ROOT,
    SELECT_STATEMENT,
    UPDATE_STATEMENT,
    DELETE_STATEMENT,
    SUBQUERY,
    SELECT_CLAUSE,
    FROM_CLAUSE,
    RANGE_DECL,
    JOIN,
    WHERE_CLAUSE,
    GROUP_BY_CLAUSE,
    HAVING_CLAUSE,
    ORDER_BY_CLAUSE,
    SET_CLAUSE,
    CONDITION,
    PREDICATE,
    PATH,
    FUNCTION_CALL,
    CASE_EXPR,

    // Must be last
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Check if this is a JPQL keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::SELECT_KW as u16) && (self as u16) <= (Self::END_KW as u16)
    }

    /// Check if this is a punctuation or operator token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::PROJECTION as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::DECIMAL | Self::STRING | Self::TRUE_KW | Self::FALSE_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: the enum is repr(u16), dense from 0, and the bound is checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Rowan language marker for the embedded languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmbeddedLanguage {}

impl rowan::Language for EmbeddedLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<EmbeddedLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<EmbeddedLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<EmbeddedLanguage>;
