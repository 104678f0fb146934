//! Concrete syntax tree for minic
//!
//! The tree is a faithful record of every grammar reduction: each production matched during parsing
//! becomes one [`SyntaxNode::Rule`] labelled with its left-hand side, and every consumed token becomes a
//! [`SyntaxNode::Leaf`]. Nothing is collapsed, so left-recursive lists nest one level per element.
//!
//! ## Notes
//! - Nodes own their children exclusively and are immutable once built.
//! - Trees can be very deep (a long declaration list nests linearly), so traversal, rendering and
//!   dropping are iterative rather than recursive.

mod render;

pub use render::render;

use std::fmt;

use crate::grammar::NonTerminal;
use crate::lexer::Token;

/// Source location span (byte offsets, half-open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Symbol used for nodes built from a zero-length production.
pub const EMPTY_SYMBOL: &str = "empty";

/// One node of the concrete syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A consumed terminal.
    Leaf(Token),
    /// A reduced non-terminal with its constituents in surface order.
    Rule { rule: NonTerminal, children: Vec<SyntaxNode> },
    /// The result of reducing a zero-length production.
    Empty,
}

impl SyntaxNode {
    /// Build the node for one reduction of `rule` over `children`.
    ///
    /// A reduction that matched nothing yields [`SyntaxNode::Empty`].
    pub fn reduce(rule: NonTerminal, children: Vec<SyntaxNode>) -> Self {
        if children.is_empty() {
            SyntaxNode::Empty
        } else {
            SyntaxNode::Rule { rule, children }
        }
    }

    /// Display label: the lexeme for a leaf, the rule name otherwise.
    pub fn symbol(&self) -> &str {
        match self {
            SyntaxNode::Leaf(token) => &token.lexeme,
            SyntaxNode::Rule { rule, .. } => rule.name(),
            SyntaxNode::Empty => EMPTY_SYMBOL,
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Rule { children, .. } => children,
            SyntaxNode::Leaf(_) | SyntaxNode::Empty => &[],
        }
    }

    pub fn rule(&self) -> Option<NonTerminal> {
        match self {
            SyntaxNode::Rule { rule, .. } => Some(*rule),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            SyntaxNode::Leaf(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SyntaxNode::Leaf(_))
    }

    /// Depth-first, pre-order walk over this node and all of its descendants.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Tokens at the leaves, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &Token> {
        self.preorder().filter_map(SyntaxNode::token)
    }

    /// Every node labelled `rule`, in pre-order.
    pub fn find_all(&self, rule: NonTerminal) -> Vec<&SyntaxNode> {
        self.preorder().filter(|n| n.rule() == Some(rule)).collect()
    }

    /// Source range covered by this node's leaves, if it has any.
    pub fn span(&self) -> Option<Span> {
        let mut leaves = self.leaves();
        let first = leaves.next()?.span;
        let last = leaves.last().map_or(first, |t| t.span);
        Some(first.merge(last))
    }

    /// Number of nodes on the longest root-to-leaf path (a lone node has depth 1).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.children().iter().map(|c| (c, depth + 1)));
        }
        max
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }
}

impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = match self {
            SyntaxNode::Rule { children, .. } if !children.is_empty() => std::mem::take(children),
            _ => return,
        };
        // Detach grandchildren before each node goes out of scope so no drop recurses.
        while let Some(mut node) = pending.pop() {
            if let SyntaxNode::Rule { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Pre-order iterator returned by [`SyntaxNode::preorder`].
pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
