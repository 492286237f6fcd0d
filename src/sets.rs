//! First and Follow set computation.
//!
//!     Both sets are grown by repeated monotone passes over the grammar
//!     until a full pass changes nothing. First runs to its fixed point
//!     before Follow starts, since Follow reads First and never the other
//!     way around.
//!
//!     First inspects only the leading symbol of each production: a leading
//!     terminal joins the set, a leading nonterminal contributes its own
//!     First terminals, and an empty production marks the nonterminal as
//!     deriving empty. The empty marker is set only by a directly empty
//!     production and is never carried over from a leading nonterminal.
//!
//!     Follow looks one symbol past each nonterminal occurrence: a terminal
//!     joins directly, a nonterminal contributes its First terminals, and
//!     the producing rule's own Follow flows in when the occurrence is last
//!     or the next symbol can derive empty.

use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::{Grammar, Symbol, END_MARKER};

/// First set of one nonterminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    /// Terminals a derivation can start with.
    pub terminals: BTreeSet<String>,
    /// Whether the nonterminal has a directly empty production.
    pub derives_empty: bool,
}

/// First and Follow sets for every nonterminal of one grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSets {
    first: BTreeMap<String, FirstSet>,
    follow: BTreeMap<String, BTreeSet<String>>,
}

impl SymbolSets {
    /// Compute both sets to their fixed points.
    pub fn compute(grammar: &Grammar) -> SymbolSets {
        let mut sets = SymbolSets::seed(grammar);
        while sets.first_pass(grammar) {}
        while sets.follow_pass(grammar) {}
        sets
    }

    /// Empty sets for every nonterminal, with the end marker placed in the
    /// start symbol's Follow set.
    pub fn seed(grammar: &Grammar) -> SymbolSets {
        let mut sets = SymbolSets::default();
        for name in grammar.nonterminals() {
            sets.first.insert(name.clone(), FirstSet::default());
            sets.follow.insert(name.clone(), BTreeSet::new());
        }
        if let Some(start_follow) = sets.follow.get_mut(grammar.start()) {
            start_follow.insert(END_MARKER.to_string());
        }
        sets
    }

    /// One First pass over every production. Returns whether anything grew.
    pub fn first_pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;
        for (lhs, productions) in grammar.rules() {
            for production in productions {
                match production.first() {
                    None => {
                        let entry = match self.first.get_mut(lhs) {
                            Some(entry) => entry,
                            None => continue,
                        };
                        if !entry.derives_empty {
                            entry.derives_empty = true;
                            changed = true;
                        }
                    }
                    Some(Symbol::Terminal(name)) => {
                        let entry = match self.first.get_mut(lhs) {
                            Some(entry) => entry,
                            None => continue,
                        };
                        changed |= entry.terminals.insert(name.clone());
                    }
                    Some(Symbol::NonTerminal(name)) => {
                        let source = match self.first.get(name) {
                            Some(set) => set.terminals.clone(),
                            None => continue,
                        };
                        let entry = match self.first.get_mut(lhs) {
                            Some(entry) => entry,
                            None => continue,
                        };
                        let before = entry.terminals.len();
                        entry.terminals.extend(source);
                        changed |= entry.terminals.len() != before;
                    }
                }
            }
        }
        changed
    }

    /// One Follow pass over every production. Returns whether anything grew.
    pub fn follow_pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;
        for (lhs, productions) in grammar.rules() {
            let lhs_follow = match self.follow.get(lhs) {
                Some(set) => set.clone(),
                None => continue,
            };
            for production in productions {
                let symbols = production.symbols();
                for (index, symbol) in symbols.iter().enumerate() {
                    let name = match symbol {
                        Symbol::NonTerminal(name) => name,
                        Symbol::Terminal(_) => continue,
                    };
                    match symbols.get(index + 1) {
                        Some(Symbol::Terminal(next)) => {
                            let target = match self.follow.get_mut(name) {
                                Some(set) => set,
                                None => continue,
                            };
                            changed |= target.insert(next.clone());
                        }
                        Some(Symbol::NonTerminal(next)) => {
                            let (source, next_derives_empty) = match self.first.get(next) {
                                Some(set) => (set.terminals.clone(), set.derives_empty),
                                None => continue,
                            };
                            let target = match self.follow.get_mut(name) {
                                Some(set) => set,
                                None => continue,
                            };
                            let before = target.len();
                            target.extend(source);
                            if next_derives_empty {
                                target.extend(lhs_follow.iter().cloned());
                            }
                            changed |= target.len() != before;
                        }
                        None => {
                            let target = match self.follow.get_mut(name) {
                                Some(set) => set,
                                None => continue,
                            };
                            let before = target.len();
                            target.extend(lhs_follow.iter().cloned());
                            changed |= target.len() != before;
                        }
                    }
                }
            }
        }
        changed
    }

    pub fn first(&self, nonterminal: &str) -> Option<&FirstSet> {
        self.first.get(nonterminal)
    }

    pub fn follow(&self, nonterminal: &str) -> Option<&BTreeSet<String>> {
        self.follow.get(nonterminal)
    }

    /// First sets in nonterminal order.
    pub fn iter_first(&self) -> impl Iterator<Item = (&str, &FirstSet)> {
        self.first.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Follow sets in nonterminal order.
    pub fn iter_follow(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.follow.iter().map(|(name, set)| (name.as_str(), set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::presets::EXPRESSION;

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_expression_first_sets() {
        let sets = SymbolSets::compute(&EXPRESSION);

        let e = sets.first("E").unwrap();
        assert_eq!(names(&e.terminals), ["(", "id"]);
        assert!(!e.derives_empty);

        let e_tail = sets.first("E'").unwrap();
        assert_eq!(names(&e_tail.terminals), ["+"]);
        assert!(e_tail.derives_empty);

        let t_tail = sets.first("T'").unwrap();
        assert_eq!(names(&t_tail.terminals), ["*"]);
        assert!(t_tail.derives_empty);

        assert_eq!(sets.first("F").unwrap(), sets.first("T").unwrap());
    }

    #[test]
    fn test_expression_follow_sets() {
        let sets = SymbolSets::compute(&EXPRESSION);

        assert_eq!(names(sets.follow("E").unwrap()), ["$", ")"]);
        assert_eq!(names(sets.follow("E'").unwrap()), ["$", ")"]);
        assert_eq!(names(sets.follow("T").unwrap()), ["$", ")", "+"]);
        assert_eq!(names(sets.follow("T'").unwrap()), ["$", ")", "+"]);
        assert_eq!(names(sets.follow("F").unwrap()), ["$", ")", "*", "+"]);
    }

    #[test]
    fn test_start_follow_seeded_with_end_marker() {
        let grammar = Grammar::load("S : a").unwrap();
        let sets = SymbolSets::seed(&grammar);
        assert_eq!(names(sets.follow("S").unwrap()), ["$"]);
    }

    #[test]
    fn test_empty_marker_is_not_inherited_through_leading_nonterminal() {
        // B can derive empty, but A has no directly empty production, so
        // A's marker stays unset even though A => B => empty.
        let grammar = Grammar::load("A : B\nB : b\nB : epsilon").unwrap();
        let sets = SymbolSets::compute(&grammar);

        let a = sets.first("A").unwrap();
        assert_eq!(names(&a.terminals), ["b"]);
        assert!(!a.derives_empty);
        assert!(sets.first("B").unwrap().derives_empty);
    }

    #[test]
    fn test_first_ignores_symbols_past_the_leading_one() {
        // Only the leading symbol feeds First, so c never reaches First(A).
        let grammar = Grammar::load("A : b c\nA : C d\nC : x").unwrap();
        let sets = SymbolSets::compute(&grammar);
        assert_eq!(names(&sets.first("A").unwrap().terminals), ["b", "x"]);
    }

    #[test]
    fn test_follow_through_nullable_neighbor() {
        // A nullable next symbol pulls in the rule's own Follow even when
        // further symbols trail it, so Follow(A) sees Follow(S) here and
        // never the later e.
        let grammar = Grammar::load("S : A B e\nA : a\nB : b\nB : epsilon").unwrap();
        let sets = SymbolSets::compute(&grammar);
        assert_eq!(names(sets.follow("A").unwrap()), ["$", "b"]);
        assert_eq!(names(sets.follow("B").unwrap()), ["e"]);
    }

    #[test]
    fn test_passes_settle() {
        let mut sets = SymbolSets::seed(&EXPRESSION);
        while sets.first_pass(&EXPRESSION) {}
        while sets.follow_pass(&EXPRESSION) {}
        assert!(!sets.first_pass(&EXPRESSION));
        assert!(!sets.follow_pass(&EXPRESSION));
    }
}
