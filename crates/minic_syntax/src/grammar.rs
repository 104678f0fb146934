//! Grammar of the minic language as const data.
//!
//! The grammar is a plain production table: each [`Production`] names its left-hand side and the
//! sequence of [`Symbol`]s on its right. The parser builds its automaton from this table, and each
//! reduction builds a tree node labelled with the production's left-hand side, so the table is the only
//! place where the language's shape is written down.
//!
//! ## Notes
//! - List rules are left-recursive (`list := item | list item`), so long lists nest in the tree.
//! - Binary arithmetic is written ambiguously (`math_expression OP math_expression`) and disambiguated
//!   solely by [`PRECEDENCE`].
//! - Production order matters: reduce/reduce conflicts resolve to the production listed first.
//!
//! ## Examples
//! ```rust
//! use minic_syntax::grammar::{self, NonTerminal};
//!
//! assert_eq!(grammar::PRODUCTIONS[0].lhs, NonTerminal::CompilationUnit);
//! assert_eq!(grammar::START, NonTerminal::CompilationUnit);
//! ```

use std::fmt;

use crate::lexer::TokenKind;
use minic_core::lang::operators::Associativity;

// ============================================================================
// Symbols
// ============================================================================

/// A non-terminal of the grammar. Its [`name`](NonTerminal::name) is the label of the tree nodes it
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    CompilationUnit,
    ExternalDeclaration,
    PrimaryExpression,
    PostfixExpression,
    ArgumentExpressionList,
    MathExpression,
    AssignmentExpression,
    Type,
    Declaration,
    DeclarationSpecifier,
    InitDeclaratorList,
    InitDeclarator,
    Declarator,
    FunctionDefinition,
    IdentifierList,
    ParameterDeclaration,
    ParameterList,
    CompoundStatement,
    CompoundStatementInner,
    CompoundList,
    StatementList,
    Statement,
    ExpressionStatement,
    JumpStatement,
    Expression,
    DeclarationList,
}

impl NonTerminal {
    pub const COUNT: usize = 26;

    pub const ALL: [NonTerminal; NonTerminal::COUNT] = [
        NonTerminal::CompilationUnit,
        NonTerminal::ExternalDeclaration,
        NonTerminal::PrimaryExpression,
        NonTerminal::PostfixExpression,
        NonTerminal::ArgumentExpressionList,
        NonTerminal::MathExpression,
        NonTerminal::AssignmentExpression,
        NonTerminal::Type,
        NonTerminal::Declaration,
        NonTerminal::DeclarationSpecifier,
        NonTerminal::InitDeclaratorList,
        NonTerminal::InitDeclarator,
        NonTerminal::Declarator,
        NonTerminal::FunctionDefinition,
        NonTerminal::IdentifierList,
        NonTerminal::ParameterDeclaration,
        NonTerminal::ParameterList,
        NonTerminal::CompoundStatement,
        NonTerminal::CompoundStatementInner,
        NonTerminal::CompoundList,
        NonTerminal::StatementList,
        NonTerminal::Statement,
        NonTerminal::ExpressionStatement,
        NonTerminal::JumpStatement,
        NonTerminal::Expression,
        NonTerminal::DeclarationList,
    ];

    /// Column index of this non-terminal in the parser's goto table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rule name, as shown in rendered trees.
    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::CompilationUnit => "compilation_unit",
            NonTerminal::ExternalDeclaration => "external_declaration",
            NonTerminal::PrimaryExpression => "primary_expression",
            NonTerminal::PostfixExpression => "postfix_expression",
            NonTerminal::ArgumentExpressionList => "argument_expression_list",
            NonTerminal::MathExpression => "math_expression",
            NonTerminal::AssignmentExpression => "assignment_expression",
            NonTerminal::Type => "type",
            NonTerminal::Declaration => "declaration",
            NonTerminal::DeclarationSpecifier => "declaration_specifier",
            NonTerminal::InitDeclaratorList => "init_declarator_list",
            NonTerminal::InitDeclarator => "init_declarator",
            NonTerminal::Declarator => "declarator",
            NonTerminal::FunctionDefinition => "function_definition",
            NonTerminal::IdentifierList => "identifier_list",
            NonTerminal::ParameterDeclaration => "parameter_declaration",
            NonTerminal::ParameterList => "parameter_list",
            NonTerminal::CompoundStatement => "compound_statement",
            NonTerminal::CompoundStatementInner => "compound_statement_inner",
            NonTerminal::CompoundList => "compound_list",
            NonTerminal::StatementList => "statement_list",
            NonTerminal::Statement => "statement",
            NonTerminal::ExpressionStatement => "expression_statement",
            NonTerminal::JumpStatement => "jump_statement",
            NonTerminal::Expression => "expression",
            NonTerminal::DeclarationList => "declaration_list",
        }
    }

    /// Resolve a rule name.
    pub fn from_name(name: &str) -> Option<NonTerminal> {
        NonTerminal::ALL.into_iter().find(|n| n.name() == name)
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A grammar symbol: a terminal (token kind) or a non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Token(TokenKind),
    Rule(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Token(kind) => f.write_str(kind.tag()),
            Symbol::Rule(rule) => f.write_str(rule.name()),
        }
    }
}

/// One alternative of a rule: `lhs := rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [Symbol],
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :", self.lhs)?;
        if self.rhs.is_empty() {
            return f.write_str(" <empty>");
        }
        for symbol in self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Production table
// ============================================================================

use NonTerminal as N;
use TokenKind as T;

const fn t(kind: TokenKind) -> Symbol {
    Symbol::Token(kind)
}

const fn r(rule: NonTerminal) -> Symbol {
    Symbol::Rule(rule)
}

const fn prod(lhs: NonTerminal, rhs: &'static [Symbol]) -> Production {
    Production { lhs, rhs }
}

/// The start symbol.
pub const START: NonTerminal = NonTerminal::CompilationUnit;

/// Every production, in declaration order. A production's index in this table is stable.
pub const PRODUCTIONS: &[Production] = &[
    // Translation unit
    prod(N::CompilationUnit, &[r(N::ExternalDeclaration)]),
    prod(N::CompilationUnit, &[r(N::CompilationUnit), r(N::ExternalDeclaration)]),
    prod(N::ExternalDeclaration, &[r(N::FunctionDefinition)]),
    prod(N::ExternalDeclaration, &[r(N::Declaration)]),
    // Expressions
    prod(N::PrimaryExpression, &[t(T::Number)]),
    prod(N::PrimaryExpression, &[t(T::Ident)]),
    prod(N::PostfixExpression, &[r(N::PrimaryExpression)]),
    prod(N::PostfixExpression, &[r(N::PostfixExpression), t(T::LParen), t(T::RParen)]),
    prod(
        N::PostfixExpression,
        &[r(N::PostfixExpression), t(T::LParen), r(N::ArgumentExpressionList), t(T::RParen)],
    ),
    prod(N::ArgumentExpressionList, &[r(N::PostfixExpression)]),
    prod(
        N::ArgumentExpressionList,
        &[r(N::ArgumentExpressionList), t(T::Comma), r(N::PostfixExpression)],
    ),
    prod(N::MathExpression, &[r(N::PostfixExpression)]),
    prod(N::MathExpression, &[r(N::MathExpression), t(T::Plus), r(N::MathExpression)]),
    prod(N::MathExpression, &[r(N::MathExpression), t(T::Minus), r(N::MathExpression)]),
    prod(N::MathExpression, &[r(N::MathExpression), t(T::Mult), r(N::MathExpression)]),
    prod(N::MathExpression, &[r(N::MathExpression), t(T::Divide), r(N::MathExpression)]),
    prod(N::MathExpression, &[r(N::MathExpression), t(T::Mod), r(N::MathExpression)]),
    prod(N::MathExpression, &[t(T::LParen), r(N::MathExpression), t(T::RParen)]),
    prod(N::AssignmentExpression, &[r(N::MathExpression)]),
    prod(
        N::AssignmentExpression,
        &[r(N::PostfixExpression), t(T::Assign), r(N::AssignmentExpression)],
    ),
    // Declarations
    prod(N::Type, &[t(T::Byte)]),
    prod(N::Type, &[t(T::Int)]),
    prod(N::Type, &[t(T::Void)]),
    prod(N::Declaration, &[r(N::DeclarationSpecifier), t(T::Semicolon)]),
    prod(
        N::Declaration,
        &[r(N::DeclarationSpecifier), r(N::InitDeclaratorList), t(T::Semicolon)],
    ),
    prod(N::DeclarationSpecifier, &[r(N::Type)]),
    prod(N::DeclarationSpecifier, &[r(N::Type), r(N::Declaration)]),
    prod(N::InitDeclaratorList, &[r(N::InitDeclarator)]),
    prod(
        N::InitDeclaratorList,
        &[r(N::InitDeclaratorList), t(T::Comma), r(N::InitDeclarator)],
    ),
    prod(N::InitDeclarator, &[r(N::Declarator)]),
    prod(N::InitDeclarator, &[r(N::Declarator), t(T::Assign), r(N::AssignmentExpression)]),
    prod(N::Declarator, &[t(T::Ident)]),
    prod(N::Declarator, &[t(T::LParen), r(N::Declarator), t(T::RParen)]),
    prod(N::Declarator, &[r(N::Declarator), t(T::LParen), t(T::RParen)]),
    prod(
        N::Declarator,
        &[r(N::Declarator), t(T::LParen), r(N::ParameterList), t(T::RParen)],
    ),
    prod(
        N::Declarator,
        &[r(N::Declarator), t(T::LParen), r(N::IdentifierList), t(T::RParen)],
    ),
    // Functions
    prod(
        N::FunctionDefinition,
        &[t(T::Func), t(T::Ident), t(T::LParen), t(T::RParen), r(N::Type), r(N::CompoundStatement)],
    ),
    prod(
        N::FunctionDefinition,
        &[
            t(T::Func),
            t(T::Ident),
            t(T::LParen),
            r(N::ParameterList),
            t(T::RParen),
            r(N::Type),
            r(N::CompoundStatement),
        ],
    ),
    prod(N::IdentifierList, &[t(T::Ident)]),
    prod(N::IdentifierList, &[r(N::IdentifierList), t(T::Comma), t(T::Ident)]),
    prod(N::ParameterDeclaration, &[r(N::DeclarationSpecifier)]),
    prod(N::ParameterDeclaration, &[r(N::DeclarationSpecifier), r(N::Declarator)]),
    prod(N::ParameterList, &[r(N::ParameterDeclaration)]),
    prod(
        N::ParameterList,
        &[r(N::ParameterList), t(T::Comma), r(N::ParameterDeclaration)],
    ),
    // Statements
    prod(N::CompoundStatement, &[t(T::LBrace), t(T::RBrace)]),
    prod(N::CompoundStatement, &[t(T::LBrace), r(N::CompoundList), t(T::RBrace)]),
    prod(N::CompoundStatementInner, &[r(N::StatementList)]),
    prod(N::CompoundStatementInner, &[r(N::DeclarationList)]),
    prod(N::CompoundList, &[r(N::CompoundStatementInner)]),
    prod(N::CompoundList, &[r(N::CompoundList), r(N::CompoundStatementInner)]),
    prod(N::StatementList, &[r(N::Statement)]),
    prod(N::StatementList, &[r(N::StatementList), r(N::Statement)]),
    prod(N::Statement, &[r(N::ExpressionStatement)]),
    prod(N::Statement, &[r(N::JumpStatement)]),
    prod(N::ExpressionStatement, &[t(T::Semicolon)]),
    prod(N::ExpressionStatement, &[r(N::Expression), t(T::Semicolon)]),
    prod(N::JumpStatement, &[t(T::Return), t(T::Semicolon)]),
    prod(N::JumpStatement, &[t(T::Return), r(N::Expression), t(T::Semicolon)]),
    prod(N::Expression, &[r(N::AssignmentExpression)]),
    prod(N::Expression, &[r(N::Expression), t(T::Comma), r(N::AssignmentExpression)]),
    prod(N::DeclarationList, &[r(N::Declaration)]),
    prod(N::DeclarationList, &[r(N::DeclarationList), r(N::Declaration)]),
];

// ============================================================================
// Precedence
// ============================================================================

/// Operator precedence levels, loosest first. Terminals on the same level share a precedence.
pub const PRECEDENCE: &[(Associativity, &[TokenKind])] = &[
    (Associativity::Left, &[TokenKind::Plus, TokenKind::Minus]),
    (Associativity::Left, &[TokenKind::Mult, TokenKind::Divide, TokenKind::Mod]),
];

/// Precedence level (1-based, higher binds tighter) and associativity of a terminal, if it has one.
pub fn precedence_of(kind: TokenKind) -> Option<(u8, Associativity)> {
    PRECEDENCE
        .iter()
        .zip(1u8..)
        .find(|((_, kinds), _)| kinds.contains(&kind))
        .map(|((assoc, _), level)| (level, *assoc))
}

/// Precedence of a production: that of its right-most terminal with a declared precedence.
pub fn production_precedence(production: &Production) -> Option<(u8, Associativity)> {
    production.rhs.iter().rev().find_map(|symbol| match symbol {
        Symbol::Token(kind) => precedence_of(*kind),
        Symbol::Rule(_) => None,
    })
}

// ============================================================================
// Text dump
// ============================================================================

/// Render the production table as BNF, one rule per block, alternatives in table order.
pub fn to_bnf() -> String {
    let mut out = String::new();
    let mut seen: Vec<NonTerminal> = Vec::new();

    for production in PRODUCTIONS {
        if seen.contains(&production.lhs) {
            continue;
        }
        seen.push(production.lhs);

        let name = production.lhs.name();
        let alternatives = PRODUCTIONS.iter().filter(|p| p.lhs == production.lhs);
        for (i, alt) in alternatives.enumerate() {
            let rhs: Vec<String> = alt.rhs.iter().map(Symbol::to_string).collect();
            if i == 0 {
                out.push_str(&format!("{name} : {}\n", rhs.join(" ")));
            } else {
                out.push_str(&format!("{:width$} | {}\n", "", rhs.join(" "), width = name.len()));
            }
        }
    }

    out
}
