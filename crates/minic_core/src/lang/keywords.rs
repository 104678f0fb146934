//! Define the reserved keyword vocabulary for the minic language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus
//! a const table ([`KEYWORDS`]) that records canonical spellings.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `Int` is an identifier, `int` is a keyword.
//! - This registry is intentionally **pure** (no syntax-tree types/IO/side effects).
//!
//! ## Examples
//! ```rust
//! use minic_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("return"), Some(KeywordId::Return));
//! assert_eq!(keywords::as_str(KeywordId::Byte), "byte");
//! assert_eq!(keywords::from_str("while"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Primitive types
    Byte,
    Int,
    Void,

    // Definitions
    Func,

    // Control flow
    Return,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Byte, "byte"),
    info(KeywordId::Int, "int"),
    info(KeywordId::Void, "void"),
    info(KeywordId::Func, "func"),
    info(KeywordId::Return, "return"),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise (the spelling is an ordinary identifier).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo { id, canonical }
}
