#![forbid(unsafe_code)]
//! minic: a syntax front-end for a small C-like language
//!
//! The crate wires the `minic_syntax` frontend (lexer, LR(1) parser, concrete syntax tree) to a command-line
//! driver. Everything interesting about the language lives in the workspace crates; this crate owns the
//! process-facing pieces: argument parsing, file reading, diagnostic printing and exit codes.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a front-end bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.

pub mod cli;
pub mod frontend;
pub mod version;

pub use frontend::cst;
pub use frontend::diagnostics;
pub use frontend::grammar;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::session;

pub use frontend::{ParsedSource, SourceParser, SyntaxNode};
