//! Logos lexer for JPQL queries
//!
//! Keywords are case-insensitive. SpEL regions (`:#{...}`, `?#{...}`) lex as
//! one token so the reconciler can hand them to the SpEL grammar. The query
//! formatter works on this token stream alone.

use logos::Logos;

use crate::syntax::SyntaxKind;
use crate::syntax::spel::balanced_braces;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpqlToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // === Keywords ===
    #[token("select", ignore(ascii_case))]
    SelectKw,
    #[token("from", ignore(ascii_case))]
    FromKw,
    #[token("where", ignore(ascii_case))]
    WhereKw,
    #[token("order", ignore(ascii_case))]
    OrderKw,
    #[token("group", ignore(ascii_case))]
    GroupKw,
    #[token("by", ignore(ascii_case))]
    ByKw,
    #[token("having", ignore(ascii_case))]
    HavingKw,
    #[token("update", ignore(ascii_case))]
    UpdateKw,
    #[token("delete", ignore(ascii_case))]
    DeleteKw,
    #[token("set", ignore(ascii_case))]
    SetKw,
    #[token("join", ignore(ascii_case))]
    JoinKw,
    #[token("left", ignore(ascii_case))]
    LeftKw,
    #[token("inner", ignore(ascii_case))]
    InnerKw,
    #[token("outer", ignore(ascii_case))]
    OuterKw,
    #[token("fetch", ignore(ascii_case))]
    FetchKw,
    #[token("on", ignore(ascii_case))]
    OnKw,
    #[token("as", ignore(ascii_case))]
    AsKw,
    #[token("and", ignore(ascii_case))]
    AndKw,
    #[token("or", ignore(ascii_case))]
    OrKw,
    #[token("not", ignore(ascii_case))]
    NotKw,
    #[token("in", ignore(ascii_case))]
    InKw,
    #[token("is", ignore(ascii_case))]
    IsKw,
    #[token("null", ignore(ascii_case))]
    NullKw,
    #[token("like", ignore(ascii_case))]
    LikeKw,
    #[token("escape", ignore(ascii_case))]
    EscapeKw,
    #[token("between", ignore(ascii_case))]
    BetweenKw,
    #[token("distinct", ignore(ascii_case))]
    DistinctKw,
    #[token("asc", ignore(ascii_case))]
    AscKw,
    #[token("desc", ignore(ascii_case))]
    DescKw,
    #[token("empty", ignore(ascii_case))]
    EmptyKw,
    #[token("member", ignore(ascii_case))]
    MemberKw,
    #[token("of", ignore(ascii_case))]
    OfKw,
    #[token("exists", ignore(ascii_case))]
    ExistsKw,
    #[token("true", ignore(ascii_case))]
    TrueKw,
    #[token("false", ignore(ascii_case))]
    FalseKw,
    #[token("new", ignore(ascii_case))]
    NewKw,
    #[token("case", ignore(ascii_case))]
    CaseKw,
    #[token("when", ignore(ascii_case))]
    WhenKw,
    #[token("then", ignore(ascii_case))]
    ThenKw,
    #[token("else", ignore(ascii_case))]
    ElseKw,
    #[token("end", ignore(ascii_case))]
    EndKw,

    // === Literals and parameters ===
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+[lL]?")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdD]?")]
    Decimal,

    #[regex(r"'([^']|'')*'")]
    String,

    #[regex(r":[A-Za-z_][A-Za-z0-9_]*")]
    NamedParam,

    #[regex(r"\?[0-9]*")]
    PositionalParam,

    #[token(":#{", balanced_braces)]
    #[token("?#{", balanced_braces)]
    SpelRegion,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<>")]
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
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("||")]
    PipePipe,
}

impl From<JpqlToken> for SyntaxKind {
    fn from(token: JpqlToken) -> Self {
        match token {
            JpqlToken::Whitespace => SyntaxKind::WHITESPACE,
            JpqlToken::SelectKw => SyntaxKind::SELECT_KW,
            JpqlToken::FromKw => SyntaxKind::FROM_KW,
            JpqlToken::WhereKw => SyntaxKind::WHERE_KW,
            JpqlToken::OrderKw => SyntaxKind::ORDER_KW,
            JpqlToken::GroupKw => SyntaxKind::GROUP_KW,
            JpqlToken::ByKw => SyntaxKind::BY_KW,
            JpqlToken::HavingKw => SyntaxKind::HAVING_KW,
            JpqlToken::UpdateKw => SyntaxKind::UPDATE_KW,
            JpqlToken::DeleteKw => SyntaxKind::DELETE_KW,
            JpqlToken::SetKw => SyntaxKind::SET_KW,
            JpqlToken::JoinKw => SyntaxKind::JOIN_KW,
            JpqlToken::LeftKw => SyntaxKind::LEFT_KW,
            JpqlToken::InnerKw => SyntaxKind::INNER_KW,
            JpqlToken::OuterKw => SyntaxKind::OUTER_KW,
            JpqlToken::FetchKw => SyntaxKind::FETCH_KW,
            JpqlToken::OnKw => SyntaxKind::ON_KW,
            JpqlToken::AsKw => SyntaxKind::AS_KW,
            JpqlToken::AndKw => SyntaxKind::AND_KW,
            JpqlToken::OrKw => SyntaxKind::OR_KW,
            JpqlToken::NotKw => SyntaxKind::NOT_KW,
            JpqlToken::InKw => SyntaxKind::IN_KW,
            JpqlToken::IsKw => SyntaxKind::IS_KW,
            JpqlToken::NullKw => SyntaxKind::NULL_KW,
            JpqlToken::LikeKw => SyntaxKind::LIKE_KW,
            JpqlToken::EscapeKw => SyntaxKind::ESCAPE_KW,
            JpqlToken::BetweenKw => SyntaxKind::BETWEEN_KW,
            JpqlToken::DistinctKw => SyntaxKind::DISTINCT_KW,
            JpqlToken::AscKw => SyntaxKind::ASC_KW,
            JpqlToken::DescKw => SyntaxKind::DESC_KW,
            JpqlToken::EmptyKw => SyntaxKind::EMPTY_KW,
            JpqlToken::MemberKw => SyntaxKind::MEMBER_KW,
            JpqlToken::OfKw => SyntaxKind::OF_KW,
            JpqlToken::ExistsKw => SyntaxKind::EXISTS_KW,
            JpqlToken::TrueKw => SyntaxKind::TRUE_KW,
            JpqlToken::FalseKw => SyntaxKind::FALSE_KW,
            JpqlToken::NewKw => SyntaxKind::NEW_KW,
            JpqlToken::CaseKw => SyntaxKind::CASE_KW,
            JpqlToken::WhenKw => SyntaxKind::WHEN_KW,
            JpqlToken::ThenKw => SyntaxKind::THEN_KW,
            JpqlToken::ElseKw => SyntaxKind::ELSE_KW,
            JpqlToken::EndKw => SyntaxKind::END_KW,
            JpqlToken::Ident => SyntaxKind::IDENT,
            JpqlToken::Integer => SyntaxKind::INTEGER,
            JpqlToken::Decimal => SyntaxKind::DECIMAL,
            JpqlToken::String => SyntaxKind::STRING,
            JpqlToken::NamedParam => SyntaxKind::NAMED_PARAM,
            JpqlToken::PositionalParam => SyntaxKind::POSITIONAL_PARAM,
            JpqlToken::SpelRegion => SyntaxKind::SPEL_REGION,
            JpqlToken::LParen => SyntaxKind::L_PAREN,
            JpqlToken::RParen => SyntaxKind::R_PAREN,
            JpqlToken::Comma => SyntaxKind::COMMA,
            JpqlToken::Dot => SyntaxKind::DOT,
            JpqlToken::Eq => SyntaxKind::EQ,
            JpqlToken::Neq => SyntaxKind::NEQ,
            JpqlToken::Lt => SyntaxKind::LT,
            JpqlToken::Le => SyntaxKind::LE,
            JpqlToken::Gt => SyntaxKind::GT,
            JpqlToken::Ge => SyntaxKind::GE,
            JpqlToken::Plus => SyntaxKind::PLUS,
            JpqlToken::Minus => SyntaxKind::MINUS,
            JpqlToken::Star => SyntaxKind::STAR,
            JpqlToken::Slash => SyntaxKind::SLASH,
            JpqlToken::PipePipe => SyntaxKind::PIPE_PIPE,
        }
    }
}
