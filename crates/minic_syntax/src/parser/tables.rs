//! Canonical LR(1) automaton built from [`grammar::PRODUCTIONS`].
//!
//! The tables are built once per process (see [`tables`]) and shared read-only by every parse.
//!
//! ## Notes
//! - Lookahead sets are `u32` bitsets indexed by [`TokenKind::index`].
//! - Shift/reduce conflicts where both sides carry a precedence are settled by
//!   [`grammar::PRECEDENCE`]; any other shift/reduce conflict shifts, and reduce/reduce conflicts keep the
//!   production listed first. Every conflict is counted in [`TableStats`].

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::grammar::{self, NonTerminal, PRODUCTIONS, Symbol};
use crate::lexer::TokenKind;
use minic_core::lang::operators::Associativity;

/// What the driver does in a state for one lookahead terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Error,
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// Summary of how the automaton was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub states: usize,
    /// Shift/reduce conflicts settled by shifting, with no precedence involved.
    pub shift_reduce: usize,
    pub reduce_reduce: usize,
    pub resolved_by_precedence: usize,
}

/// Action and goto tables, row-major by state.
#[derive(Debug)]
pub struct ParseTables {
    actions: Vec<Action>,
    gotos: Vec<Option<usize>>,
    stats: TableStats,
}

/// How many times [`ParseTables::build`] has run in this process.
#[cfg(test)]
pub(crate) static BUILD_COUNT: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

static TABLES: LazyLock<ParseTables> = LazyLock::new(|| {
    let tables = ParseTables::build();
    tracing::debug!(
        states = tables.stats.states,
        shift_reduce = tables.stats.shift_reduce,
        reduce_reduce = tables.stats.reduce_reduce,
        resolved_by_precedence = tables.stats.resolved_by_precedence,
        "built LR(1) parse tables"
    );
    tables
});

/// The process-wide parse tables, built on first use.
pub fn tables() -> &'static ParseTables {
    &TABLES
}

impl ParseTables {
    pub fn action(&self, state: usize, lookahead: TokenKind) -> Action {
        self.actions[state * TokenKind::COUNT + lookahead.index()]
    }

    pub fn goto(&self, state: usize, rule: NonTerminal) -> Option<usize> {
        self.gotos[state * NonTerminal::COUNT + rule.index()]
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Terminals with a non-error action in `state`, in [`TokenKind::ALL`] order.
    pub fn expected(&self, state: usize) -> Vec<TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(|kind| self.action(state, *kind) != Action::Error)
            .collect()
    }

    fn build() -> Self {
        #[cfg(test)]
        BUILD_COUNT.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        let mut builder = Builder::new();
        builder.run();
        builder.finish()
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Production index of the augmented start rule `$accept : compilation_unit`.
const AUGMENTED: usize = PRODUCTIONS.len();
const AUGMENTED_RHS: &[Symbol] = &[Symbol::Rule(grammar::START)];

/// LR(1) items `(production, dot)` mapped to their lookahead bitset.
type ItemSet = BTreeMap<(usize, usize), u32>;

fn rhs(production: usize) -> &'static [Symbol] {
    if production == AUGMENTED {
        AUGMENTED_RHS
    } else {
        PRODUCTIONS[production].rhs
    }
}

fn bit(kind: TokenKind) -> u32 {
    1 << kind.index()
}

struct Builder {
    first: Vec<u32>,
    nullable: Vec<bool>,
    kernels: Vec<ItemSet>,
    index: HashMap<ItemSet, usize>,
    actions: Vec<Action>,
    gotos: Vec<Option<usize>>,
    stats: TableStats,
}

impl Builder {
    fn new() -> Self {
        let (first, nullable) = first_sets();
        let mut builder = Self {
            first,
            nullable,
            kernels: Vec::new(),
            index: HashMap::new(),
            actions: Vec::new(),
            gotos: Vec::new(),
            stats: TableStats::default(),
        };
        builder.intern(ItemSet::from([((AUGMENTED, 0), bit(TokenKind::Eof))]));
        builder
    }

    fn intern(&mut self, kernel: ItemSet) -> usize {
        if let Some(&state) = self.index.get(&kernel) {
            return state;
        }
        let state = self.kernels.len();
        self.index.insert(kernel.clone(), state);
        self.kernels.push(kernel);
        self.actions.extend([Action::Error; TokenKind::COUNT]);
        self.gotos.extend([None; NonTerminal::COUNT]);
        state
    }

    fn run(&mut self) {
        let mut state = 0;
        while state < self.kernels.len() {
            let items = self.closure(&self.kernels[state]);
            self.fill_transitions(state, &items);
            self.fill_reductions(state, &items);
            state += 1;
        }
    }

    fn finish(self) -> ParseTables {
        ParseTables {
            actions: self.actions,
            gotos: self.gotos,
            stats: TableStats {
                states: self.kernels.len(),
                ..self.stats
            },
        }
    }

    /// FIRST of a symbol sequence followed by `lookahead`.
    fn first_of(&self, symbols: &[Symbol], lookahead: u32) -> u32 {
        let mut set = 0;
        for symbol in symbols {
            match symbol {
                Symbol::Token(kind) => return set | bit(*kind),
                Symbol::Rule(rule) => {
                    set |= self.first[rule.index()];
                    if !self.nullable[rule.index()] {
                        return set;
                    }
                }
            }
        }
        set | lookahead
    }

    fn closure(&self, kernel: &ItemSet) -> ItemSet {
        let mut items = kernel.clone();
        let mut work: Vec<(usize, usize)> = items.keys().copied().collect();

        while let Some((production, dot)) = work.pop() {
            let lookahead = items[&(production, dot)];
            let symbols = rhs(production);
            let Some(Symbol::Rule(rule)) = symbols.get(dot) else {
                continue;
            };
            let follow = self.first_of(&symbols[dot + 1..], lookahead);

            for (candidate, _) in PRODUCTIONS.iter().enumerate().filter(|(_, p)| p.lhs == *rule) {
                let entry = items.entry((candidate, 0)).or_insert(0);
                if *entry | follow != *entry {
                    *entry |= follow;
                    work.push((candidate, 0));
                }
            }
        }

        items
    }

    fn fill_transitions(&mut self, state: usize, items: &ItemSet) {
        let mut moves: BTreeMap<Symbol, ItemSet> = BTreeMap::new();
        for (&(production, dot), &lookahead) in items {
            if let Some(symbol) = rhs(production).get(dot) {
                *moves.entry(*symbol).or_default().entry((production, dot + 1)).or_insert(0) |= lookahead;
            }
        }

        for (symbol, kernel) in moves {
            let target = self.intern(kernel);
            match symbol {
                Symbol::Token(kind) => self.actions[state * TokenKind::COUNT + kind.index()] = Action::Shift(target),
                Symbol::Rule(rule) => self.gotos[state * NonTerminal::COUNT + rule.index()] = Some(target),
            }
        }
    }

    fn fill_reductions(&mut self, state: usize, items: &ItemSet) {
        for (&(production, dot), &lookahead) in items {
            if dot != rhs(production).len() {
                continue;
            }
            for kind in TokenKind::ALL.into_iter().filter(|k| lookahead & bit(*k) != 0) {
                let slot = state * TokenKind::COUNT + kind.index();
                let proposed = if production == AUGMENTED {
                    Action::Accept
                } else {
                    Action::Reduce(production)
                };
                self.actions[slot] = self.resolve(self.actions[slot], proposed, kind);
            }
        }
    }

    fn resolve(&mut self, existing: Action, proposed: Action, lookahead: TokenKind) -> Action {
        match (existing, proposed) {
            (Action::Error, _) => proposed,
            (Action::Shift(_), Action::Reduce(production)) => {
                let reduce_prec = grammar::production_precedence(&PRODUCTIONS[production]);
                let shift_prec = grammar::precedence_of(lookahead);
                match (reduce_prec, shift_prec) {
                    (Some((reduce_level, _)), Some((shift_level, assoc))) => {
                        self.stats.resolved_by_precedence += 1;
                        if reduce_level > shift_level {
                            proposed
                        } else if reduce_level < shift_level {
                            existing
                        } else {
                            match assoc {
                                Associativity::Left => proposed,
                                Associativity::Right => existing,
                            }
                        }
                    }
                    _ => {
                        self.stats.shift_reduce += 1;
                        existing
                    }
                }
            }
            (Action::Reduce(kept), Action::Reduce(other)) => {
                self.stats.reduce_reduce += 1;
                Action::Reduce(kept.min(other))
            }
            _ => existing,
        }
    }
}

/// FIRST sets and nullability for every non-terminal, by fixed-point iteration.
fn first_sets() -> (Vec<u32>, Vec<bool>) {
    let mut first = vec![0u32; NonTerminal::COUNT];
    let mut nullable = vec![false; NonTerminal::COUNT];

    let mut changed = true;
    while changed {
        changed = false;
        for production in PRODUCTIONS {
            let lhs = production.lhs.index();
            let mut set = first[lhs];
            let mut all_nullable = true;
            for symbol in production.rhs {
                match symbol {
                    Symbol::Token(kind) => {
                        set |= bit(*kind);
                        all_nullable = false;
                    }
                    Symbol::Rule(rule) => {
                        set |= first[rule.index()];
                        all_nullable = nullable[rule.index()];
                    }
                }
                if !all_nullable {
                    break;
                }
            }
            if set != first[lhs] {
                first[lhs] = set;
                changed = true;
            }
            if all_nullable && !nullable[lhs] {
                nullable[lhs] = true;
                changed = true;
            }
        }
    }

    (first, nullable)
}
