//! Parse table text format.
//!
//!     One cell per line, tab separated: nonterminal, lookahead, then the
//!     production's symbols. An empty production writes no symbol fields at
//!     all, though the literal `epsilon` is still accepted on load for
//!     tables written by hand.
//!
//!     The first line names the start symbol, so the writer puts the start
//!     nonterminal's rows first and sorts the rest after them. The reader
//!     rebuilds the nonterminal set from the first column, which is enough
//!     to reclassify every production symbol.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use crate::events::{EventSink, ParseEvent, SkipReason};
use crate::grammar::{Production, Symbol, EPSILON};
use crate::table::ParseTable;

/// Table text held no usable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReadError {
    /// Every line was blank or skipped, so no start symbol exists.
    Empty,
}

impl fmt::Display for TableReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableReadError::Empty => write!(f, "no valid row found in table text"),
        }
    }
}

impl Error for TableReadError {}

/// Render a table to its text format, start rows first.
pub fn write_table(table: &ParseTable) -> String {
    let mut start_rows = Vec::new();
    let mut other_rows = Vec::new();

    for (nonterminal, lookahead, production) in table.cells() {
        let mut fields = vec![nonterminal, lookahead];
        fields.extend(production.symbols().iter().map(Symbol::name));
        let line = fields.join("\t");
        if nonterminal == table.start() {
            start_rows.push(line);
        } else {
            other_rows.push(line);
        }
    }

    let mut out = String::new();
    for line in start_rows.into_iter().chain(other_rows) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Load a table from its text format.
///
/// Lines with fewer than two fields are skipped with a diagnostic through
/// `sink`. A repeated cell silently keeps the last row.
pub fn read_table(source: &str, sink: &mut dyn EventSink) -> Result<ParseTable, TableReadError> {
    let mut rows: Vec<(String, String, Vec<String>)> = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace().map(str::to_string);
        match (fields.next(), fields.next()) {
            (Some(nonterminal), Some(lookahead)) => {
                rows.push((nonterminal, lookahead, fields.collect()));
            }
            _ => sink.emit(ParseEvent::LineSkipped {
                line: index + 1,
                reason: SkipReason::MissingTableFields,
                text: line.to_string(),
            }),
        }
    }

    let start = match rows.first() {
        Some((nonterminal, _, _)) => nonterminal.clone(),
        None => return Err(TableReadError::Empty),
    };

    let nonterminals: BTreeSet<String> = rows.iter().map(|(name, _, _)| name.clone()).collect();
    let mut table = ParseTable::new(start);

    for (nonterminal, lookahead, symbols) in rows {
        let symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|name| name != EPSILON)
            .map(|name| {
                if nonterminals.contains(&name) {
                    Symbol::NonTerminal(name)
                } else {
                    Symbol::Terminal(name)
                }
            })
            .collect();
        table.insert(nonterminal, lookahead, Production::new(symbols));
    }

    Ok(table)
}
