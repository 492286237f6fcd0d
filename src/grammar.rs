//! Grammar model: symbols, productions, and the immutable grammar itself.
//!
//!     A grammar is built once by the loader and never mutated. Right-hand
//!     sides are sequences of tagged symbols, so the rest of the crate never
//!     has to guess whether a name is a terminal; the loader settles that
//!     question exactly once, by the rule that anything never appearing on a
//!     left-hand side is a terminal.
//!
//!     Nonterminals iterate in sorted order and productions in file order,
//!     which keeps every listing, table build, and diagnostic reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub mod loader;
pub mod presets;

pub use loader::{load_grammar, GrammarLoadError};

/// The distinguished end-of-input terminal.
pub const END_MARKER: &str = "$";

/// The keyword denoting the empty production in grammar text. Never a
/// grammar symbol itself.
pub const EPSILON: &str = "epsilon";

/// A grammar symbol, tagged by kind.
///
/// Two symbols are equal iff they have the same tag and name; `E` the
/// terminal and `E` the nonterminal would be distinct (the loader's
/// classification makes sure only one of them ever exists per grammar).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    /// The end-of-input terminal `$`.
    pub fn end_marker() -> Self {
        Symbol::Terminal(END_MARKER.to_string())
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) => name,
            Symbol::NonTerminal(name) => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::Terminal(name) if name == END_MARKER)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One right-hand-side alternative for a nonterminal.
///
/// An empty symbol sequence is the empty derivation (epsilon). The loader
/// guarantees no `epsilon` literal ever survives into the symbol list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Production { symbols }
    }

    /// The empty derivation.
    pub fn empty() -> Self {
        Production {
            symbols: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The leading symbol, if any. Everything the set computer and table
    /// builder predict from hangs off this one symbol.
    pub fn first(&self) -> Option<&Symbol> {
        self.symbols.first()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return write!(f, "{}", EPSILON);
        }
        let mut first = true;
        for symbol in &self.symbols {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol)?;
            first = false;
        }
        Ok(())
    }
}

/// An immutable context-free grammar.
///
/// Invariants, upheld by the loader:
/// - terminal and nonterminal name sets are disjoint
/// - every symbol inside any production belongs to one of the two sets
/// - the start nonterminal has at least one production
/// - the end marker `$` is always in the terminal set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    productions: BTreeMap<String, Vec<Production>>,
    terminals: BTreeSet<String>,
    nonterminals: BTreeSet<String>,
}

impl Grammar {
    pub(crate) fn from_parts(
        start: String,
        productions: BTreeMap<String, Vec<Production>>,
        terminals: BTreeSet<String>,
        nonterminals: BTreeSet<String>,
    ) -> Self {
        Grammar {
            start,
            productions,
            terminals,
            nonterminals,
        }
    }

    /// Load a grammar from text, discarding diagnostics. See
    /// [`loader::load_grammar`] for the sink-aware form.
    pub fn load(source: &str) -> Result<Grammar, GrammarLoadError> {
        loader::load_grammar(source, &mut crate::events::NullSink)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Productions of one nonterminal, in file order. Empty for unknown
    /// names.
    pub fn productions_of(&self, nonterminal: &str) -> &[Production] {
        self.productions
            .get(nonterminal)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All rules, nonterminals in sorted order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &[Production])> {
        self.productions
            .iter()
            .map(|(name, productions)| (name.as_str(), productions.as_slice()))
    }

    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.contains(name)
    }

    /// Total number of productions across all nonterminals.
    pub fn production_count(&self) -> usize {
        self.productions.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_equality_is_tag_and_name() {
        assert_eq!(Symbol::terminal("id"), Symbol::terminal("id"));
        assert_ne!(Symbol::terminal("E"), Symbol::nonterminal("E"));
    }

    #[test]
    fn test_end_marker_symbol() {
        assert!(Symbol::end_marker().is_end_marker());
        assert!(Symbol::end_marker().is_terminal());
        assert!(!Symbol::terminal("id").is_end_marker());
    }

    #[test]
    fn test_production_display() {
        let production = Production::new(vec![
            Symbol::nonterminal("T"),
            Symbol::terminal("+"),
            Symbol::nonterminal("E"),
        ]);
        assert_eq!(production.to_string(), "T + E");
        assert_eq!(Production::empty().to_string(), "epsilon");
    }

    #[test]
    fn test_productions_of_unknown_nonterminal_is_empty() {
        let grammar = Grammar::load("S : a").expect("valid grammar");
        assert!(grammar.productions_of("X").is_empty());
    }
}
