//! Expression tokenizer.
//!
//!     A [`logos`] lexer over arithmetic expression text. [`tokenize`]
//!     yields raw tokens with their byte spans, while [`token_records`]
//!     folds them into the terminal and lexeme pairs the parse engine
//!     consumes, with identifiers and numbers collapsed to the `id`
//!     terminal and the end marker appended.

use std::error::Error;
use std::fmt;

use logos::Logos;

use crate::token::TokenRecord;

pub mod tokens;

pub use tokens::Token;

/// Input contained text no token rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    UnexpectedCharacter { text: String, position: usize },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::UnexpectedCharacter { text, position } => {
                write!(f, "unexpected character '{}' at byte {}", text, position)
            }
        }
    }
}

impl Error for TokenizeError {}

/// Tokenize expression text, keeping each token's byte span.
pub fn tokenize(source: &str) -> Result<Vec<(Token, logos::Span)>, TokenizeError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(TokenizeError::UnexpectedCharacter {
                    text: lexer.slice().to_string(),
                    position: lexer.span().start,
                })
            }
        }
    }

    Ok(tokens)
}

/// Tokenize expression text into engine-ready records, end marker included.
pub fn token_records(source: &str) -> Result<Vec<TokenRecord>, TokenizeError> {
    let mut records: Vec<TokenRecord> = tokenize(source)?
        .into_iter()
        .map(|(token, _)| TokenRecord::new(token.terminal_class(), token.lexeme()))
        .collect();
    records.push(TokenRecord::end_of_input());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_spans() {
        let tokens = tokenize("a + 12").expect("input should tokenize");
        assert_eq!(
            tokens,
            [
                (Token::Identifier("a".to_string()), 0..1),
                (Token::Plus, 2..3),
                (Token::Number("12".to_string()), 4..6),
            ]
        );
    }

    #[test]
    fn test_token_records_fold_to_terminals() {
        let records = token_records("x + 3.5 * ( y )").expect("input should tokenize");
        let classes: Vec<&str> = records.iter().map(|r| r.terminal.as_str()).collect();
        assert_eq!(classes, ["id", "+", "id", "*", "(", "id", ")", "$"]);
        assert_eq!(records[0].lexeme, "x");
        assert_eq!(records[2].lexeme, "3.5");
    }

    #[test]
    fn test_token_records_end_with_marker() {
        let records = token_records("").expect("input should tokenize");
        assert_eq!(records, [TokenRecord::end_of_input()]);
    }

    #[test]
    fn test_unexpected_character_is_an_error() {
        let error = token_records("a ~ b").expect_err("tilde should not tokenize");
        assert_eq!(
            error,
            TokenizeError::UnexpectedCharacter {
                text: "~".to_string(),
                position: 2,
            }
        );
        assert_eq!(error.to_string(), "unexpected character '~' at byte 2");
    }
}
