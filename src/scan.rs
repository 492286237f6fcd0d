//! Color call scanner.
//!
//!     A small [`logos`] lexer for color call text such as
//!     `RED(255, 0, 0) blue`, kept separate from the expression tokenizer
//!     because its alphabet is different: only the three color names are
//!     words, they match in any casing and fold to lowercase, and the scan
//!     reports which colors appeared at all.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use logos::Logos;

/// One token of color call text.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum ScanRecord {
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token(",")]
    Comma,

    /// An integer channel value.
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// A color name in any casing, stored lowercase.
    #[regex(
        "[Rr][Ee][Dd]|[Gg][Rr][Ee][Ee][Nn]|[Bb][Ll][Uu][Ee]",
        |lex| lex.slice().to_ascii_lowercase()
    )]
    Color(String),
}

impl fmt::Display for ScanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanRecord::LeftParen => write!(f, "LPAREN"),
            ScanRecord::RightParen => write!(f, "RPAREN"),
            ScanRecord::Comma => write!(f, "COMMA"),
            ScanRecord::Number(value) => write!(f, "NUMBER {}", value),
            ScanRecord::Color(name) => write!(f, "COLOR {}", name),
        }
    }
}

/// Everything one scan found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Tokens in input order.
    pub records: Vec<ScanRecord>,
    /// Distinct lowercased color names, sorted.
    pub colors_used: BTreeSet<String>,
}

/// Input contained text no scan rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    UnexpectedCharacter { text: String, position: usize },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::UnexpectedCharacter { text, position } => {
                write!(f, "unexpected character '{}' at byte {}", text, position)
            }
        }
    }
}

impl Error for ScanError {}

/// Scan color call text.
pub fn scan(source: &str) -> Result<ScanReport, ScanError> {
    let mut lexer = ScanRecord::lexer(source);
    let mut records = Vec::new();
    let mut colors_used = BTreeSet::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(record) => {
                if let ScanRecord::Color(name) = &record {
                    colors_used.insert(name.clone());
                }
                records.push(record);
            }
            Err(()) => {
                return Err(ScanError::UnexpectedCharacter {
                    text: lexer.slice().to_string(),
                    position: lexer.span().start,
                })
            }
        }
    }

    Ok(ScanReport {
        records,
        colors_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_color_call() {
        let report = scan("red(255, 0, 127)").expect("input should scan");
        assert_eq!(
            report.records,
            [
                ScanRecord::Color("red".to_string()),
                ScanRecord::LeftParen,
                ScanRecord::Number("255".to_string()),
                ScanRecord::Comma,
                ScanRecord::Number("0".to_string()),
                ScanRecord::Comma,
                ScanRecord::Number("127".to_string()),
                ScanRecord::RightParen,
            ]
        );
    }

    #[test]
    fn test_color_names_fold_to_lowercase() {
        let report = scan("RED Blue rEd green").expect("input should scan");
        let colors: Vec<&str> = report.colors_used.iter().map(String::as_str).collect();
        assert_eq!(colors, ["blue", "green", "red"]);
        assert_eq!(report.records[0], ScanRecord::Color("red".to_string()));
    }

    #[test]
    fn test_colors_used_ignores_repeats() {
        let report = scan("red red RED").expect("input should scan");
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.colors_used.len(), 1);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(ScanRecord::LeftParen.to_string(), "LPAREN");
        assert_eq!(ScanRecord::Number("42".to_string()).to_string(), "NUMBER 42");
        assert_eq!(ScanRecord::Color("red".to_string()).to_string(), "COLOR red");
    }

    #[test]
    fn test_unexpected_character_is_an_error() {
        let error = scan("red; blue").expect_err("semicolon should not scan");
        assert_eq!(
            error,
            ScanError::UnexpectedCharacter {
                text: ";".to_string(),
                position: 3,
            }
        );
    }
}
