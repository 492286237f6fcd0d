//! Stack-driven predictive parser.
//!
//!     The engine runs the classic LL(1) automaton: a symbol stack seeded
//!     with the end marker and the start nonterminal, and one token of
//!     lookahead. A terminal on top must match the lookahead, a nonterminal
//!     is replaced by its table production pushed in reverse, and the input
//!     is accepted when the stack runs out.
//!
//!     Lookahead past the last token is synthesized as the end marker, so
//!     callers may omit the explicit final `$` record. Tokens left after
//!     the end marker is matched are not examined.

use std::error::Error;
use std::fmt;

use crate::events::{EventSink, NullSink, ParseEvent};
use crate::grammar::{Symbol, END_MARKER};
use crate::table::ParseTable;
use crate::token::TokenRecord;

/// Verdict of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted,
    Rejected(SyntaxError),
}

impl ParseOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ParseOutcome::Accepted)
    }

    /// The rejection, if the input was rejected.
    pub fn error(&self) -> Option<&SyntaxError> {
        match self {
            ParseOutcome::Accepted => None,
            ParseOutcome::Rejected(error) => Some(error),
        }
    }
}

/// Why and where an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Which automaton step failed.
    pub reason: RejectReason,
    /// Terminal class of the offending lookahead.
    pub lookahead: String,
    /// Source text of the offending lookahead.
    pub lexeme: String,
    /// Token index the engine stopped at.
    pub position: usize,
}

/// The two ways the automaton can get stuck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Top of stack was a terminal that is not the lookahead.
    UnexpectedToken { expected: String },
    /// Top of stack was a nonterminal with no table entry for the lookahead.
    NoProduction { nonterminal: String },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::UnexpectedToken { expected } => write!(
                f,
                "expected '{}', found '{}' (lexeme '{}') at token {}",
                expected, self.lookahead, self.lexeme, self.position
            ),
            RejectReason::NoProduction { nonterminal } => write!(
                f,
                "no rule for '{}' on '{}' (lexeme '{}') at token {}",
                nonterminal, self.lookahead, self.lexeme, self.position
            ),
        }
    }
}

impl Error for SyntaxError {}

impl ParseTable {
    /// Run the engine with no event reporting.
    pub fn parse(&self, tokens: &[TokenRecord]) -> ParseOutcome {
        parse(self, tokens, &mut NullSink)
    }
}

/// Run the predictive automaton over `tokens`, reporting every step
/// through `sink`.
pub fn parse(
    table: &ParseTable,
    tokens: &[TokenRecord],
    sink: &mut dyn EventSink,
) -> ParseOutcome {
    let mut stack = vec![Symbol::end_marker(), Symbol::nonterminal(table.start())];
    let mut cursor = 0usize;

    while let Some(top) = stack.last().cloned() {
        let (lookahead, lexeme) = current(tokens, cursor);

        match top {
            Symbol::Terminal(name) => {
                if name == lookahead {
                    sink.emit(ParseEvent::TerminalMatched {
                        terminal: name,
                        lexeme: lexeme.to_string(),
                        position: cursor,
                    });
                    stack.pop();
                    cursor += 1;
                } else {
                    sink.emit(ParseEvent::Rejected { position: cursor });
                    return ParseOutcome::Rejected(SyntaxError {
                        reason: RejectReason::UnexpectedToken { expected: name },
                        lookahead: lookahead.to_string(),
                        lexeme: lexeme.to_string(),
                        position: cursor,
                    });
                }
            }
            Symbol::NonTerminal(name) => match table.production_for(&name, lookahead) {
                Some(production) => {
                    sink.emit(ParseEvent::RuleApplied {
                        nonterminal: name,
                        production: production.clone(),
                    });
                    stack.pop();
                    for symbol in production.symbols().iter().rev() {
                        stack.push(symbol.clone());
                    }
                }
                None => {
                    sink.emit(ParseEvent::Rejected { position: cursor });
                    return ParseOutcome::Rejected(SyntaxError {
                        reason: RejectReason::NoProduction { nonterminal: name },
                        lookahead: lookahead.to_string(),
                        lexeme: lexeme.to_string(),
                        position: cursor,
                    });
                }
            },
        }
    }

    sink.emit(ParseEvent::Accepted);
    ParseOutcome::Accepted
}

/// Lookahead at `cursor`, synthesizing the end marker past the last token.
fn current(tokens: &[TokenRecord], cursor: usize) -> (&str, &str) {
    match tokens.get(cursor) {
        Some(record) => (record.terminal.as_str(), record.lexeme.as_str()),
        None => (END_MARKER, END_MARKER),
    }
}
