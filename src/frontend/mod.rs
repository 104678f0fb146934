//! minic frontend
//!
//! Re-exports the syntax pipeline so the CLI and integration tests have one import path:
//! - `lexer`: tokenization of source code
//! - `parser`: LR(1) parsing of tokens into a concrete syntax tree
//! - `cst`: syntax tree nodes, traversal and rendering
//! - `grammar`: the production table and operator precedence
//! - `session`: the read-once construction and query contract
//! - `diagnostics`: error reporting
//! - `lang`: keyword, operator and punctuation registries

pub use minic_core::lang;
pub use minic_syntax::{cst, diagnostics, grammar, lexer, parser, session};
pub use minic_syntax::{CompileError, ErrorKind, ParsedSource, SessionError, SourceParser, Span, SyntaxNode};
