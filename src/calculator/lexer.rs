//! Scans a normalized expression and produces a stream of tokens.
//!
//! Recognizes numbers (`12`, `1.5`, `.5`, `1e309`), identifiers, the
//! arithmetic operators `+ - * / // % ^ **`, parentheses and commas.
//! Syntax that belongs to a general-purpose language (strings, brackets,
//! bitwise, comparison and assignment operators, and keywords such as
//! `if` or `not`) is lexed as
//! [`Token::Unsupported`] so the parser can report it as such instead of
//! as garbage.

use super::token::Token;

/// Words of control flow and boolean logic. They are never names.
pub const RESERVED_WORDS: &[&str] = &[
    "and", "else", "for", "if", "in", "is", "lambda", "not", "or",
];

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.bump() else {
            return Token::Eof;
        };

        match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '*' => {
                if self.eat('*') {
                    Token::Caret
                } else {
                    Token::Star
                }
            }
            '/' => {
                if self.eat('/') {
                    Token::DoubleSlash
                } else {
                    Token::Slash
                }
            }

            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.read_number(ch),
            c if c.is_ascii_digit() => self.read_number(c),
            c if is_identifier_start(c) => self.read_identifier(c),

            '\'' | '"' => self.read_string(ch),
            '<' | '>' => self.read_comparison(ch),
            '=' => {
                if self.eat('=') {
                    Token::Unsupported("==".into())
                } else {
                    Token::Unsupported("=".into())
                }
            }
            '!' if self.eat('=') => Token::Unsupported("!=".into()),
            '.' | '&' | '|' | '~' | '@' | ':' | ';' | '[' | ']' | '{' | '}' => {
                Token::Unsupported(ch.to_string())
            }

            other => Token::Illegal(other),
        }
    }

    /// Collects every token up to and including [`Token::Eof`].
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn read_number(&mut self, first_char: char) -> Token {
        let mut number_str = String::from(first_char);
        let mut has_dot = first_char == '.';

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number_str.push(ch);
            } else {
                break;
            }
            self.pos += 1;
        }

        // Exponent only when digits actually follow, so "2e" stays a number
        // followed by the identifier `e`.
        if matches!(self.peek(), Some('e' | 'E')) {
            let digits_at = match self.peek_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    if let Some(ch) = self.bump() {
                        number_str.push(ch);
                    }
                }
                while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
                    number_str.push(ch);
                    self.pos += 1;
                }
            }
        }

        match number_str.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Illegal(first_char),
        }
    }

    fn read_identifier(&mut self, first_char: char) -> Token {
        let mut ident = String::from(first_char);

        while let Some(ch) = self.peek() {
            if is_identifier_start(ch) || ch.is_ascii_digit() {
                ident.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }

        if is_reserved_word(&ident) {
            Token::Unsupported(ident)
        } else {
            Token::Identifier(ident)
        }
    }

    /// Consumes a quoted string so its contents are not lexed as code.
    fn read_string(&mut self, quote: char) -> Token {
        while let Some(ch) = self.bump() {
            if ch == quote {
                break;
            }
        }
        Token::Unsupported("string literal".into())
    }

    fn read_comparison(&mut self, first: char) -> Token {
        let mut symbol = String::from(first);
        if let Some(next) = self.peek()
            && (next == first || next == '=')
        {
            symbol.push(next);
            self.pos += 1;
        }
        Token::Unsupported(symbol)
    }
}

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Returns true if `ch` can start an identifier.
fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    #[test]
    fn test_simple_math() {
        assert_eq!(
            lex("1 + 2.5 * x"),
            vec![
                Token::Number(1.0),
                Token::Plus,
                Token::Number(2.5),
                Token::Star,
                Token::Identifier("x".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            lex("7 // 2 ** 3"),
            vec![
                Token::Number(7.0),
                Token::DoubleSlash,
                Token::Number(2.0),
                Token::Caret,
                Token::Number(3.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(lex(".5")[0], Token::Number(0.5));
        assert_eq!(lex("1.")[0], Token::Number(1.0));
        assert_eq!(lex("2.5E-3")[0], Token::Number(0.0025));
        assert_eq!(lex("1e309")[0], Token::Number(f64::INFINITY));
    }

    #[test]
    fn test_only_decimal_literals() {
        assert_eq!(
            lex("1_000"),
            vec![Token::Number(1.0), Token::Identifier("_000".into()), Token::Eof]
        );
        assert_eq!(
            lex("0x10"),
            vec![Token::Number(0.0), Token::Identifier("x10".into()), Token::Eof]
        );
    }

    #[test]
    fn test_dangling_exponent_is_identifier() {
        assert_eq!(
            lex("2e"),
            vec![Token::Number(2.0), Token::Identifier("e".into()), Token::Eof]
        );
    }

    #[test]
    fn test_foreign_syntax_is_marked_unsupported() {
        assert_eq!(lex("1 << 2")[1], Token::Unsupported("<<".into()));
        assert_eq!(lex("~1")[0], Token::Unsupported("~".into()));
        assert_eq!(lex("[1]")[0], Token::Unsupported("[".into()));
        assert_eq!(lex("x=1")[1], Token::Unsupported("=".into()));
        assert_eq!(lex("math.pi")[1], Token::Unsupported(".".into()));
        assert_eq!(
            lex("f('os')"),
            vec![
                Token::Identifier("f".into()),
                Token::LParen,
                Token::Unsupported("string literal".into()),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_reserved_words_are_marked_unsupported() {
        assert_eq!(
            lex("not x"),
            vec![
                Token::Unsupported("not".into()),
                Token::Identifier("x".into()),
                Token::Eof,
            ]
        );
        assert_eq!(lex("1 if 2 else 3")[1], Token::Unsupported("if".into()));
        assert_eq!(lex("notice")[0], Token::Identifier("notice".into()));
        assert_eq!(lex("iff")[0], Token::Identifier("iff".into()));
    }

    #[test]
    fn test_unknown_characters_are_illegal() {
        assert_eq!(lex("$")[0], Token::Illegal('$'));
        assert_eq!(lex("π")[0], Token::Illegal('π'));
    }
}
