//! Grammar text loader.
//!
//!     One production per line, `NonTerminal : symbol symbol ...`, with the
//!     colon as a required whitespace-delimited separator. The literal
//!     `epsilon` (alone, or stray among other symbols) stands for nothing
//!     and is dropped, so `E' : epsilon` yields the empty production.
//!
//!     Classification is two-pass: every left-hand-side name is a
//!     nonterminal, and only after all lines are read does every remaining
//!     right-hand-side name become a terminal. Forward references therefore
//!     need no declarations. The end marker `$` is always a terminal.
//!
//!     Blank lines are skipped silently; malformed lines are skipped with a
//!     [`ParseEvent::LineSkipped`] diagnostic. Loading fails only when not a
//!     single valid production was read.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::events::{EventSink, ParseEvent, SkipReason};
use crate::grammar::{Grammar, Production, Symbol, END_MARKER, EPSILON};

/// Shape of a well-formed production line: left-hand side, separator,
/// optional symbol list.
static RULE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s+:(?:\s+(.*))?$").unwrap());

/// Grammar text could not produce a usable grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarLoadError {
    /// Not one line parsed as a production, so no start symbol exists.
    NoProductions,
}

impl fmt::Display for GrammarLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarLoadError::NoProductions => {
                write!(f, "no valid production found in grammar source")
            }
        }
    }
}

impl Error for GrammarLoadError {}

/// Parse grammar text into a [`Grammar`].
///
/// The first valid line's nonterminal becomes the start symbol. Skipped
/// lines and the final grammar summary are reported through `sink`.
pub fn load_grammar(
    source: &str,
    sink: &mut dyn EventSink,
) -> Result<Grammar, GrammarLoadError> {
    let mut rules: Vec<(String, Vec<String>)> = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_rule_line(line) {
            Ok((lhs, rhs)) => rules.push((lhs, rhs)),
            Err(reason) => sink.emit(ParseEvent::LineSkipped {
                line: index + 1,
                reason,
                text: line.to_string(),
            }),
        }
    }

    let start = match rules.first() {
        Some((lhs, _)) => lhs.clone(),
        None => return Err(GrammarLoadError::NoProductions),
    };

    let nonterminals: BTreeSet<String> = rules.iter().map(|(lhs, _)| lhs.clone()).collect();
    let mut terminals: BTreeSet<String> = BTreeSet::new();
    let mut productions: BTreeMap<String, Vec<Production>> = BTreeMap::new();

    for (lhs, rhs) in rules {
        let symbols: Vec<Symbol> = rhs
            .into_iter()
            .filter(|name| name != EPSILON)
            .map(|name| {
                if nonterminals.contains(&name) {
                    Symbol::NonTerminal(name)
                } else {
                    terminals.insert(name.clone());
                    Symbol::Terminal(name)
                }
            })
            .collect();
        productions
            .entry(lhs)
            .or_default()
            .push(Production::new(symbols));
    }

    terminals.insert(END_MARKER.to_string());

    let grammar = Grammar::from_parts(start, productions, terminals, nonterminals);
    sink.emit(ParseEvent::GrammarLoaded {
        start: grammar.start().to_string(),
        productions: grammar.production_count(),
        terminals: grammar.terminals().len(),
        nonterminals: grammar.nonterminals().len(),
    });

    Ok(grammar)
}

/// Split one trimmed, non-blank line into left-hand side and raw
/// right-hand-side fields.
fn parse_rule_line(line: &str) -> Result<(String, Vec<String>), SkipReason> {
    let captures = match RULE_LINE.captures(line) {
        Some(captures) => captures,
        None => {
            // Distinguish a line that starts with the separator from one
            // that never has it.
            let first = line.split_whitespace().next().unwrap_or("");
            if first == ":" {
                return Err(SkipReason::EmptyLeftHandSide);
            }
            return Err(SkipReason::MissingSeparator);
        }
    };

    let lhs = &captures[1];
    if lhs == ":" {
        return Err(SkipReason::EmptyLeftHandSide);
    }

    let rhs = captures
        .get(2)
        .map(|symbols| {
            symbols
                .as_str()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok((lhs.to_string(), rhs))
}
