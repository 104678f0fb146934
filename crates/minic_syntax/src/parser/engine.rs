//! Shift/reduce driver over the shared LR(1) tables.

use super::tables::{self, Action, ParseTables};
use crate::cst::{Span, SyntaxNode};
use crate::diagnostics::CompileError;
use crate::grammar::PRODUCTIONS;
use crate::lexer::{Token, TokenKind};

/// Parser state for one run over a token stream.
///
/// ## Notes
/// - The token stream is consumed exactly once, left to right, without backtracking.
/// - The first token that cannot continue any derivation aborts the parse with a single error.
/// - A stream that runs out (or reaches its final `Eof`) early reports `unexpected end of input`.
/// - An `Eof` token followed by further tokens is a syntax error, never an early end.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    debug: bool,
    tables: &'static ParseTables,
    states: Vec<usize>,
    values: Vec<SyntaxNode>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `minic_syntax::lexer`, with or without the trailing `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            debug: false,
            tables: tables::tables(),
            states: vec![0],
            values: Vec::new(),
        }
    }

    /// Emit a `tracing` event for every shift and reduce.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Parse the entire token stream into a syntax tree rooted at `compilation_unit`.
    ///
    /// ## Errors
    /// Returns the [`CompileError`] for the first token that does not fit the grammar.
    pub fn parse(mut self) -> Result<SyntaxNode, CompileError> {
        loop {
            if let Some(token) = self.stray_eof() {
                return Err(CompileError::syntax(
                    "unexpected token EOF before the end of the token stream".to_string(),
                    token.span,
                )
                .with_note("`Eof` may only appear as the last token"));
            }

            let state = self.state();
            let lookahead = self.lookahead();

            match self.tables.action(state, lookahead) {
                Action::Shift(next) => self.shift(next),
                Action::Reduce(production) => self.reduce(production)?,
                Action::Accept => return self.accept(),
                Action::Error => return Err(self.syntax_error(state)),
            }
        }
    }

    // ========================================================================
    // Stream helpers
    // ========================================================================

    fn state(&self) -> usize {
        self.states.last().copied().unwrap_or(0)
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn lookahead(&self) -> TokenKind {
        self.current().map_or(TokenKind::Eof, |t| t.kind)
    }

    /// The current token if it is an `Eof` that more tokens follow.
    fn stray_eof(&self) -> Option<&'a Token> {
        self.current()
            .filter(|t| t.kind == TokenKind::Eof && self.pos + 1 < self.tokens.len())
    }

    /// Position reported when the input ends: the `Eof` token if present, else just past the last token.
    fn end_span(&self) -> Span {
        match self.current() {
            Some(token) => token.span,
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                Span::new(end, end)
            }
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn shift(&mut self, next: usize) {
        // Only real tokens are ever shifted; `Eof` has no shift action.
        let Some(token) = self.current() else {
            return;
        };
        if self.debug {
            tracing::debug!(state = self.state(), next, token = %token.kind, lexeme = %token.lexeme, "shift");
        }
        self.values.push(SyntaxNode::Leaf(token.clone()));
        self.states.push(next);
        self.pos += 1;
    }

    fn reduce(&mut self, production: usize) -> Result<(), CompileError> {
        let rule = &PRODUCTIONS[production];
        let arity = rule.rhs.len();

        let split = self.values.len().saturating_sub(arity);
        let children = self.values.split_off(split);
        self.states.truncate(self.states.len().saturating_sub(arity));

        let from = self.state();
        let Some(next) = self.tables.goto(from, rule.lhs) else {
            return Err(CompileError::internal(
                format!("no goto from state {from} on {}", rule.lhs),
                self.end_span(),
            ));
        };

        if self.debug {
            tracing::debug!(production, rule = %rule, state = next, "reduce");
        }
        self.values.push(SyntaxNode::reduce(rule.lhs, children));
        self.states.push(next);
        Ok(())
    }

    fn accept(mut self) -> Result<SyntaxNode, CompileError> {
        if self.debug {
            tracing::debug!(tokens = self.pos, "accept");
        }
        match (self.values.pop(), self.values.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err(CompileError::internal(
                "parse accepted with an unbalanced value stack".to_string(),
                self.end_span(),
            )),
        }
    }

    fn syntax_error(&self, state: usize) -> CompileError {
        let expected: Vec<&str> = self.tables.expected(state).into_iter().map(TokenKind::tag).collect();
        let expected = format!("expected one of: {}", expected.join(", "));

        match self.current().filter(|t| t.kind != TokenKind::Eof) {
            Some(token) => CompileError::syntax(
                format!("unexpected token {} '{}'", token.kind.tag(), token.lexeme),
                token.span,
            )
            .with_note(expected),
            None => CompileError::unexpected_eof("unexpected end of input".to_string(), self.end_span())
                .with_note(expected),
        }
    }
}
