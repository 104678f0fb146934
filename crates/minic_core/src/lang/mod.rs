//! minic language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators, and
//! punctuation.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via
//! registry tables instead of comparing strings across the codebase.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no syntax-tree types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and operator precedence for shared use
//!   (token tags, diagnostics, the parser's precedence table).
//!
//! ## Examples
//! ```rust
//! use minic_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("func"), Some(KeywordId::Func));
//! assert_eq!(keywords::as_str(KeywordId::Func), "func");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
