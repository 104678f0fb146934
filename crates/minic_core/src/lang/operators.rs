//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with precedence, associativity, and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (and all operators are symbols anyway).
//! - `precedence` is a relative ordering where higher binds tighter. The arithmetic levels mirror the
//!   parser's precedence table: `+ -` bind looser than `* / %`, all left-associative.
//! - Assignment is right-associative through the grammar itself (`postfix = assignment`); its registry
//!   entry records that, but it takes no part in conflict resolution.
//!
//! ## Examples
//! ```rust
//! use minic_core::lang::operators::{self, Associativity, OperatorId};
//!
//! assert_eq!(operators::from_str("%"), Some(OperatorId::Percent));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! assert_eq!(operators::info_for(OperatorId::Minus).associativity, Associativity::Left);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define whether an operator takes part in binary arithmetic or is an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Assignment,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Assignment
    Eq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Additive
    op(OperatorId::Plus, "+", 10, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, "-", 10, Associativity::Left, Fixity::Infix),
    // Multiplicative
    op(OperatorId::Star, "*", 20, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 20, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", 20, Associativity::Left, Fixity::Infix),
    // Assignment
    op(OperatorId::Eq, "=", 1, Associativity::Right, Fixity::Assignment),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Iterate the binary arithmetic operators, loosest-binding first.
///
/// This is the order in which precedence levels are declared to the parser.
pub fn binary_by_precedence() -> impl Iterator<Item = &'static OperatorInfo> {
    let mut infix: Vec<&'static OperatorInfo> = OPERATORS.iter().filter(|o| o.fixity == Fixity::Infix).collect();
    infix.sort_by_key(|o| o.precedence);
    infix.into_iter()
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
    }
}
