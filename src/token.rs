//! Token records exchanged between tokenizers and the parser engine.

use crate::grammar::END_MARKER;

/// One classified token as the parser engine sees it.
///
/// `terminal` is the grammar terminal the token stands for, `lexeme` the
/// original source text. A well-formed stream ends with the end-of-input
/// record; the engine synthesizes one if the stream runs out early.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TokenRecord {
    pub terminal: String,
    pub lexeme: String,
}

impl TokenRecord {
    pub fn new(terminal: impl Into<String>, lexeme: impl Into<String>) -> Self {
        TokenRecord {
            terminal: terminal.into(),
            lexeme: lexeme.into(),
        }
    }

    /// The stream-terminating end-of-input record.
    pub fn end_of_input() -> Self {
        TokenRecord::new(END_MARKER, END_MARKER)
    }

    pub fn is_end_of_input(&self) -> bool {
        self.terminal == END_MARKER
    }
}
