//! # llone
//!
//! A grammar-driven LL(1) predictive parsing engine.
//!
//! Grammars are plain text, one production per line. From a loaded
//! [`Grammar`] the crate computes First and Follow sets, fills a
//! predictive [`ParseTable`], and runs a stack automaton over tokenized
//! input, reporting every step as a [`ParseEvent`]. Tables round-trip
//! through a line-oriented text format so they can be built once and
//! reloaded.
//!
//! ## Testing
//!
//! Token factories and fluent outcome assertions live in the
//! [testing module](testing).

pub mod engine;
pub mod events;
pub mod grammar;
pub mod lexing;
pub mod scan;
pub mod sets;
pub mod table;
pub mod testing;
pub mod token;

pub use engine::{parse, ParseOutcome, RejectReason, SyntaxError};
pub use events::{EventLog, EventSink, NullSink, ParseEvent, SkipReason};
pub use grammar::{load_grammar, Grammar, GrammarLoadError, Production, Symbol};
pub use lexing::{token_records, tokenize, Token, TokenizeError};
pub use scan::{scan, ScanError, ScanRecord, ScanReport};
pub use sets::{FirstSet, SymbolSets};
pub use table::{
    build_table, read_table, write_table, ParseTable, TableBuild, TableConflict, TableReadError,
};
pub use token::TokenRecord;
