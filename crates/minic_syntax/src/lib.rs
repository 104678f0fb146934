//! Syntax frontend for the minic language: lexer, grammar, LR(1) parser, concrete syntax tree, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the `minic` CLI and any future tooling.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: no name resolution, type checking, or code generation.
//! - The tree is a concrete syntax tree: every reduction becomes one node, nothing is collapsed.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `minic_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use minic_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("int x;").unwrap();
//! let tree = parser::parse(&tokens).unwrap();
//! let rendered = tree.to_string();
//! assert!(rendered.starts_with("compilation_unit\n└── external_declaration\n    └── declaration\n"));
//! assert_eq!(rendered.lines().count(), tree.node_count());
//! ```
//!
//! ## See also
//! - `minic_core::lang` for registry-backed language vocabulary.

pub mod cst;
pub mod diagnostics;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod session;

pub use cst::{Span, SyntaxNode};
pub use diagnostics::{CompileError, ErrorKind};
pub use session::{ParsedSource, SessionError, SourceParser, UsageError};
