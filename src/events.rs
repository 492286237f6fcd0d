//! Structured diagnostic events emitted by the loader, the table builder,
//! and the parser engine.
//!
//!     Every stage narrates its progress through an injectable sink instead
//!     of writing to the console. Library callers stay silent by passing
//!     [`NullSink`]; tests and the CLI collect or render the stream. The
//!     events are plain data so a sink can filter, count, or pretty-print
//!     them without knowing which stage produced them.

use std::fmt;

use crate::grammar::Production;

/// A single diagnostic event in the load/build/parse pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// A malformed line in grammar or table source was skipped.
    LineSkipped {
        /// 1-based line number in the source text.
        line: usize,
        reason: SkipReason,
        /// The offending line, trimmed.
        text: String,
    },

    /// A grammar finished loading; carries the summary the caller would
    /// otherwise have to recompute.
    GrammarLoaded {
        start: String,
        productions: usize,
        terminals: usize,
        nonterminals: usize,
    },

    /// Two productions competed for the same table cell; the later one won.
    TableConflict {
        nonterminal: String,
        lookahead: String,
    },

    /// The engine expanded a nonterminal with a production.
    RuleApplied {
        nonterminal: String,
        production: Production,
    },

    /// The engine matched a terminal against the current token.
    TerminalMatched {
        terminal: String,
        lexeme: String,
        position: usize,
    },

    /// The engine reached the accept state.
    Accepted,

    /// The engine rejected the input.
    Rejected { position: usize },
}

/// Why a source line was skipped during loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `:` separator between the left-hand side and the production.
    MissingSeparator,

    /// The line starts with the separator, leaving no left-hand side.
    EmptyLeftHandSide,

    /// A serialized table line with fewer than two fields.
    MissingTableFields,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingSeparator => "missing ':' separator",
            SkipReason::EmptyLeftHandSide => "empty left-hand side",
            SkipReason::MissingTableFields => "fewer than two fields",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEvent::LineSkipped { line, reason, text } => {
                write!(f, "skipped line {} ({}): '{}'", line, reason, text)
            }
            ParseEvent::GrammarLoaded {
                start,
                productions,
                terminals,
                nonterminals,
            } => write!(
                f,
                "grammar loaded: start '{}', {} productions, {} terminals, {} nonterminals",
                start, productions, terminals, nonterminals
            ),
            ParseEvent::TableConflict {
                nonterminal,
                lookahead,
            } => write!(
                f,
                "LL(1) conflict for '{}' on '{}', overwriting",
                nonterminal, lookahead
            ),
            ParseEvent::RuleApplied {
                nonterminal,
                production,
            } => write!(f, "apply {} -> {}", nonterminal, production),
            ParseEvent::TerminalMatched {
                terminal,
                lexeme,
                position,
            } => write!(
                f,
                "matched '{}' (lexeme '{}') at token {}",
                terminal, lexeme, position
            ),
            ParseEvent::Accepted => write!(f, "input accepted"),
            ParseEvent::Rejected { position } => {
                write!(f, "input rejected at token {}", position)
            }
        }
    }
}

/// Receiver for diagnostic events.
///
/// Object-safe so stages can take `&mut dyn EventSink` without caring what
/// is on the other end.
pub trait EventSink {
    fn emit(&mut self, event: ParseEvent);
}

/// Sink that appends every event to a vector.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventLog {
    events: Vec<ParseEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn events(&self) -> &[ParseEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ParseEvent> {
        self.events
    }

    /// All skipped-line events, for callers that only care about load noise.
    pub fn skipped_lines(&self) -> impl Iterator<Item = &ParseEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, ParseEvent::LineSkipped { .. }))
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: ParseEvent) {
        self.events.push(event);
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: ParseEvent) {}
}
