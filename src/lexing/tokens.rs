//! Token definitions for expression input.

use std::fmt;

use logos::Logos;

/// One lexical token of expression input.
///
/// Keyword datatypes are split from identifiers so declarations keep their
/// spelling, while identifiers and numbers both collapse to the `id`
/// terminal when parsed.
#[derive(Logos, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// A builtin datatype keyword.
    #[token("int", |lex| lex.slice().to_string())]
    #[token("float", |lex| lex.slice().to_string())]
    #[token("char", |lex| lex.slice().to_string())]
    Datatype(String),

    /// A name that is not a keyword.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// An integer or decimal literal.
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| lex.slice().to_string())]
    Number(String),

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Times,

    #[token("/")]
    Divide,

    #[token("=")]
    Assign,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,
}

impl Token {
    /// The grammar terminal this token parses as.
    ///
    /// Identifiers and numbers both read as `id`; datatype keywords and
    /// punctuation read as their own spelling.
    pub fn terminal_class(&self) -> &str {
        match self {
            Token::Datatype(name) => name.as_str(),
            Token::Identifier(_) | Token::Number(_) => "id",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Times => "*",
            Token::Divide => "/",
            Token::Assign => "=",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
        }
    }

    /// The source text the token was read from. Punctuation spells itself,
    /// so this only differs from [`Token::terminal_class`] for identifiers
    /// and numbers.
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Datatype(text) | Token::Identifier(text) | Token::Number(text) => {
                text.as_str()
            }
            other => other.terminal_class(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Datatype(_) => write!(f, "DATATYPE"),
            Token::Identifier(_) => write!(f, "IDENTIFIER"),
            Token::Number(_) => write!(f, "NUMBER"),
            Token::Plus => write!(f, "PLUS"),
            Token::Minus => write!(f, "MINUS"),
            Token::Times => write!(f, "TIMES"),
            Token::Divide => write!(f, "DIVIDE"),
            Token::Assign => write!(f, "ASSIGN"),
            Token::LeftParen => write!(f, "LPAREN"),
            Token::RightParen => write!(f, "RPAREN"),
            Token::Comma => write!(f, "COMMA"),
            Token::Semicolon => write!(f, "SEMICOLON"),
        }
    }
}
