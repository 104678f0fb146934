//! Canonical language vocabulary for the minic front-end.
//!
//! This crate is intentionally small and dependency-free. It owns the spellings and metadata of every
//! reserved word, operator and punctuation token so that the lexer, parser, diagnostics and tooling agree
//! on a single source of truth.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no syntax-tree types.
//! - Syntax rules (what may follow what) live in `minic_syntax`; this crate only answers
//!   “what is this spelling” and “how tightly does this operator bind”.

pub mod lang;
