//! Token types for the minic lexer.
//!
//! [`TokenKind`] is the closed set of token tags the parser accepts. Keyword, operator and punctuation
//! kinds are resolved from the `minic_core::lang` registries, so spellings never need to be compared as
//! strings outside of those tables.
//!
//! ## Notes
//! - Every kind has an upper-case tag name (`NUMBER`, `ID`, `LPAREN`, …) used in diagnostics and grammar
//!   dumps.
//! - `Eof` terminates every stream produced by the lexer. Token slices handed directly to the parser may
//!   omit it; running off the end of the slice is treated the same way.

use crate::cst::Span;
use minic_core::lang::keywords::{self, KeywordId};
use minic_core::lang::operators::{self, OperatorId};
use minic_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind (tag) of a token.
///
/// The discriminant order is significant: it is the column index of the parser's action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // ========== Literals / names ==========
    Number,
    Ident,

    // ========== Keywords ==========
    Byte,
    Int,
    Void,
    Func,
    Return,

    // ========== Operators ==========
    Plus,
    Minus,
    Mult,
    Divide,
    Mod,
    Assign,

    // ========== Punctuation ==========
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    /// Number of token kinds, `Eof` included.
    pub const COUNT: usize = 20;

    /// Every token kind in table-column order.
    pub const ALL: [TokenKind; TokenKind::COUNT] = [
        TokenKind::Number,
        TokenKind::Ident,
        TokenKind::Byte,
        TokenKind::Int,
        TokenKind::Void,
        TokenKind::Func,
        TokenKind::Return,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Mult,
        TokenKind::Divide,
        TokenKind::Mod,
        TokenKind::Assign,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Eof,
    ];

    /// Column index of this kind in the parser tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case tag name, as used by the grammar.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Ident => "ID",
            TokenKind::Byte => "BYTE",
            TokenKind::Int => "INT",
            TokenKind::Void => "VOID",
            TokenKind::Func => "FUNC",
            TokenKind::Return => "RETURN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mult => "MULT",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Mod => "MOD",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Fixed spelling for keyword/operator/punctuation kinds; `None` for `NUMBER`, `ID` and `EOF`.
    pub fn spelling(self) -> Option<&'static str> {
        if let Some(id) = self.keyword() {
            return Some(keywords::as_str(id));
        }
        if let Some(id) = self.operator() {
            return Some(operators::as_str(id));
        }
        self.punctuation().map(punctuation::as_str)
    }

    /// Registry id for keyword kinds.
    pub fn keyword(self) -> Option<KeywordId> {
        match self {
            TokenKind::Byte => Some(KeywordId::Byte),
            TokenKind::Int => Some(KeywordId::Int),
            TokenKind::Void => Some(KeywordId::Void),
            TokenKind::Func => Some(KeywordId::Func),
            TokenKind::Return => Some(KeywordId::Return),
            _ => None,
        }
    }

    /// Registry id for operator kinds.
    pub fn operator(self) -> Option<OperatorId> {
        match self {
            TokenKind::Plus => Some(OperatorId::Plus),
            TokenKind::Minus => Some(OperatorId::Minus),
            TokenKind::Mult => Some(OperatorId::Star),
            TokenKind::Divide => Some(OperatorId::Slash),
            TokenKind::Mod => Some(OperatorId::Percent),
            TokenKind::Assign => Some(OperatorId::Eq),
            _ => None,
        }
    }

    /// Registry id for punctuation kinds.
    pub fn punctuation(self) -> Option<PunctuationId> {
        match self {
            TokenKind::Comma => Some(PunctuationId::Comma),
            TokenKind::Semicolon => Some(PunctuationId::Semicolon),
            TokenKind::LParen => Some(PunctuationId::LParen),
            TokenKind::RParen => Some(PunctuationId::RParen),
            TokenKind::LBrace => Some(PunctuationId::LBrace),
            TokenKind::RBrace => Some(PunctuationId::RBrace),
            _ => None,
        }
    }

    pub fn from_keyword(id: KeywordId) -> Self {
        match id {
            KeywordId::Byte => TokenKind::Byte,
            KeywordId::Int => TokenKind::Int,
            KeywordId::Void => TokenKind::Void,
            KeywordId::Func => TokenKind::Func,
            KeywordId::Return => TokenKind::Return,
        }
    }

    pub fn from_operator(id: OperatorId) -> Self {
        match id {
            OperatorId::Plus => TokenKind::Plus,
            OperatorId::Minus => TokenKind::Minus,
            OperatorId::Star => TokenKind::Mult,
            OperatorId::Slash => TokenKind::Divide,
            OperatorId::Percent => TokenKind::Mod,
            OperatorId::Eq => TokenKind::Assign,
        }
    }

    pub fn from_punctuation(id: PunctuationId) -> Self {
        match id {
            PunctuationId::Comma => TokenKind::Comma,
            PunctuationId::Semicolon => TokenKind::Semicolon,
            PunctuationId::LParen => TokenKind::LParen,
            PunctuationId::RParen => TokenKind::RParen,
            PunctuationId::LBrace => TokenKind::LBrace,
            PunctuationId::RBrace => TokenKind::RBrace,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A token: its tag, the literal text it was scanned from, and its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Construct a token for a fixed-spelling kind, without a meaningful source position.
    ///
    /// Handy for feeding hand-built token streams to the parser.
    ///
    /// ## Returns
    /// - `None` if `kind` has no fixed spelling (`NUMBER`, `ID`, `EOF`).
    pub fn fixed(kind: TokenKind) -> Option<Self> {
        kind.spelling().map(|lexeme| Self::new(kind, lexeme, Span::default()))
    }
}
