//! Parser for the minic language
//!
//! Converts a token stream into a concrete syntax tree using a table-driven LR(1) automaton built from
//! [`crate::grammar`].
//!
//! ## Module Structure
//!
//! - `tables` - LR(1) automaton construction (built once per process)
//! - `engine` - shift/reduce driver and tree building
//!
//! ## Examples
//!
//! ```rust
//! use minic_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("int x = 1 + 2;").unwrap();
//! let tree = parser::parse(&tokens).unwrap();
//! assert_eq!(tree.symbol(), "compilation_unit");
//! ```

mod engine;
mod tables;

pub use engine::Parser;
pub use tables::{Action, ParseTables, TableStats, tables};

use crate::cst::SyntaxNode;
use crate::diagnostics::CompileError;
use crate::lexer::Token;

/// Parse a token stream into a syntax tree.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `minic_syntax::lexer`.
///
/// ## Errors
/// Returns the single [`CompileError`] that aborted the parse.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<SyntaxNode, CompileError> {
    Parser::new(tokens).parse()
}

/// Like [`parse`], additionally tracing every shift and reduce at `debug` level when `debug` is set.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), debug))]
pub fn parse_with_debug(tokens: &[Token], debug: bool) -> Result<SyntaxNode, CompileError> {
    Parser::new(tokens).with_debug(debug).parse()
}

/// Statistics of the shared parse tables (building them if needed).
pub fn table_stats() -> TableStats {
    tables().stats()
}
