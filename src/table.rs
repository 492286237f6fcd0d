//! Predictive parse table.
//!
//!     The table maps a nonterminal and a lookahead terminal to the
//!     production to apply. It is filled from First and Follow: a
//!     production lands under each terminal its leading symbol can start
//!     with, and a production that can derive empty lands under every
//!     terminal in its nonterminal's Follow set.
//!
//!     Filling is not checked for LL(1)-ness up front. When two productions
//!     claim one cell the later one simply replaces the earlier and the
//!     collision is reported as a [`TableConflict`], so ambiguous grammars
//!     still produce a usable table plus an honest list of what was lost.

use std::collections::BTreeMap;
use std::fmt;

use crate::events::{EventSink, NullSink, ParseEvent};
use crate::grammar::{Grammar, Production, Symbol};
use crate::sets::SymbolSets;

pub mod serial;

pub use serial::{read_table, write_table, TableReadError};

/// A filled predictive table for one grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    start: String,
    cells: BTreeMap<(String, String), Production>,
}

impl ParseTable {
    pub(crate) fn new(start: impl Into<String>) -> ParseTable {
        ParseTable {
            start: start.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Place a production, returning the one it displaced if the cell was
    /// already taken.
    pub(crate) fn insert(
        &mut self,
        nonterminal: impl Into<String>,
        lookahead: impl Into<String>,
        production: Production,
    ) -> Option<Production> {
        self.cells
            .insert((nonterminal.into(), lookahead.into()), production)
    }

    /// Build the table for `grammar`, swallowing conflict events.
    pub fn build(grammar: &Grammar) -> TableBuild {
        let sets = SymbolSets::compute(grammar);
        build_table(grammar, &sets, &mut NullSink)
    }

    /// Nonterminal the parse stack starts from.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The production to apply for `nonterminal` when `lookahead` is next.
    pub fn production_for(&self, nonterminal: &str, lookahead: &str) -> Option<&Production> {
        self.cells
            .get(&(nonterminal.to_string(), lookahead.to_string()))
    }

    /// Lookaheads that have an entry for `nonterminal`, in sorted order.
    pub fn expected_for(&self, nonterminal: &str) -> Vec<&str> {
        self.cells
            .keys()
            .filter(|(name, _)| name == nonterminal)
            .map(|(_, lookahead)| lookahead.as_str())
            .collect()
    }

    /// All filled cells in sorted order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, &Production)> {
        self.cells
            .iter()
            .map(|((name, lookahead), production)| {
                (name.as_str(), lookahead.as_str(), production)
            })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One overwritten table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConflict {
    /// Row the collision happened in.
    pub nonterminal: String,
    /// Column the collision happened in.
    pub lookahead: String,
    /// Production that was pushed out.
    pub discarded: Production,
    /// Production that now occupies the cell.
    pub winner: Production,
}

impl fmt::Display for TableConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LL(1) conflict for '{}' on '{}': '{}' replaces '{}'",
            self.nonterminal, self.lookahead, self.winner, self.discarded
        )
    }
}

/// A built table together with every conflict hit while filling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBuild {
    pub table: ParseTable,
    pub conflicts: Vec<TableConflict>,
}

impl TableBuild {
    /// Whether the grammar filled the table without a single collision.
    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Fill a predictive table from precomputed First and Follow sets.
///
/// Rows are visited in sorted nonterminal order and productions in their
/// source order, so on a conflict the production latest in that order wins.
/// Each collision is emitted through `sink` and returned.
pub fn build_table(
    grammar: &Grammar,
    sets: &SymbolSets,
    sink: &mut dyn EventSink,
) -> TableBuild {
    let mut table = ParseTable::new(grammar.start());
    let mut conflicts = Vec::new();

    for (lhs, productions) in grammar.rules() {
        for production in productions {
            let mut derives_empty = production.is_empty();

            match production.first() {
                None => {}
                Some(Symbol::Terminal(name)) => {
                    place(&mut table, &mut conflicts, sink, lhs, name, production);
                }
                Some(Symbol::NonTerminal(name)) => {
                    if let Some(first) = sets.first(name) {
                        for lookahead in &first.terminals {
                            place(&mut table, &mut conflicts, sink, lhs, lookahead, production);
                        }
                        derives_empty |= first.derives_empty;
                    }
                }
            }

            if derives_empty {
                if let Some(follow) = sets.follow(lhs) {
                    for lookahead in follow {
                        place(&mut table, &mut conflicts, sink, lhs, lookahead, production);
                    }
                }
            }
        }
    }

    TableBuild { table, conflicts }
}

fn place(
    table: &mut ParseTable,
    conflicts: &mut Vec<TableConflict>,
    sink: &mut dyn EventSink,
    nonterminal: &str,
    lookahead: &str,
    production: &Production,
) {
    if let Some(discarded) = table.insert(nonterminal, lookahead, production.clone()) {
        sink.emit(ParseEvent::TableConflict {
            nonterminal: nonterminal.to_string(),
            lookahead: lookahead.to_string(),
        });
        conflicts.push(TableConflict {
            nonterminal: nonterminal.to_string(),
            lookahead: lookahead.to_string(),
            discarded,
            winner: production.clone(),
        });
    }
}
