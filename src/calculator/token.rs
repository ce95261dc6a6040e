//! Tokens produced by the lexer and consumed by the parser.

use std::fmt;

/// Tokens recognized by the expression lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Number(f64),
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    /// Floor division: `//`
    DoubleSlash,
    Percent,
    /// Power: `^` or `**`
    Caret,

    // Delimiters
    LParen,
    RParen,
    Comma,

    /// Recognizable syntax that the calculator refuses: strings, brackets,
    /// bitwise and comparison operators, `=`, `:`, attribute dots.
    Unsupported(String),

    // Special
    Eof,
    Illegal(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::DoubleSlash => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Unsupported(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "end of input"),
            Token::Illegal(c) => write!(f, "'{}'", c),
        }
    }
}
