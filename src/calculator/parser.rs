//! Recursive descent parser that converts a stream of tokens into an AST.
//!
//! GRAMMAR:
//!   expression     --> additive
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/" | "//" | "%") unary )*
//!   unary          --> ("+" | "-") unary | power
//!   power          --> primary ( "^" unary )?
//!   primary        --> NUMBER | IDENTIFIER | function_call | "(" expression ")"
//!   function_call  --> IDENTIFIER "(" arguments? ")"
//!   arguments      --> expression ("," expression)*
//!
//! The parser only checks shape. Whether an operator, constant or function
//! is actually allowed is decided by the evaluator against its configuration.

use super::ast::{BinaryOperator, Expression, UnaryOperator};
use super::error::EvalError;
use super::lexer::Lexer;
use super::token::Token;

/// Deepest tree accepted. Parentheses, calls, unary operators and every
/// operator in a chain like `1 + 1 + 1` each count one level.
pub const MAX_DEPTH: usize = 256;

pub type ParseResult<T> = Result<T, EvalError>;

static EOF: Token = Token::Eof;

/// Parses a normalized expression into a single tree.
pub fn parse(input: &str) -> ParseResult<Expression> {
    Parser::new(input).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            tokens: Lexer::new(input).tokenize(),
            pos: 0,
            depth: 0,
        }
    }

    /// Parses the entire input and returns the AST.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        self.reject_foreign_syntax()?;

        if *self.current() == Token::Eof {
            return Err(EvalError::EmptyExpression);
        }

        let expr = self.parse_expression()?;

        if *self.current() != Token::Eof {
            return Err(self.unexpected("after expression"));
        }

        Ok(expr)
    }

    /// Tokens like `<<` or `[` can never be part of a valid expression, so
    /// their presence classifies the whole input as unsupported.
    fn reject_foreign_syntax(&self) -> ParseResult<()> {
        for (index, token) in self.tokens.iter().enumerate() {
            if let Token::Unsupported(symbol) = token {
                let after_name =
                    index > 0 && matches!(self.tokens[index - 1], Token::Identifier(_));
                if symbol == "=" && after_name {
                    return Err(EvalError::unsupported("keyword arguments are not supported"));
                }
                return Err(EvalError::unsupported(format!("'{}' is not allowed", symbol)));
            }
        }
        Ok(())
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if *self.current() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("where '{}' was expected", expected)))
        }
    }

    fn unexpected(&self, context: &str) -> EvalError {
        match self.current() {
            Token::Illegal(ch) => EvalError::invalid(format!("unexpected character '{}'", ch)),
            Token::Eof => EvalError::invalid("unexpected end of input"),
            token => EvalError::invalid(format!("unexpected token {} {}", token, context)),
        }
    }

    fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::invalid("expression is nested too deeply"));
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.descend()?;
        let expr = self.parse_additive();
        self.depth -= 1;
        expr
    }

    /// Parses additive expressions (+ and -).
    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative()?;
        let depth = self.depth;

        loop {
            let op = match self.current() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.advance();
            // The chain is left-nested, so each operator adds a level.
            self.descend()?;
            let right = self.parse_multiplicative()?;

            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parses multiplicative expressions (*, /, // and %).
    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;
        let depth = self.depth;

        loop {
            let op = match self.current() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                Token::DoubleSlash => BinaryOperator::FloorDivide,
                Token::Percent => BinaryOperator::Modulo,
                _ => break,
            };

            self.advance();
            // The chain is left-nested, so each operator adds a level.
            self.descend()?;
            let right = self.parse_unary()?;

            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parses prefix + and -. Binds looser than `^`, so `-2^2` is `-(2^2)`.
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let op = match self.current() {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Negate,
            _ => return self.parse_power(),
        };

        self.advance();
        self.descend()?;
        let operand = self.parse_unary();
        self.depth -= 1;

        Ok(Expression::UnaryOp {
            op,
            operand: Box::new(operand?),
        })
    }

    /// Parses `^`. The right side goes back through unary, which makes the
    /// operator right-associative and allows `2^-1`.
    fn parse_power(&mut self) -> ParseResult<Expression> {
        let base = self.parse_primary()?;

        if *self.current() != Token::Caret {
            return Ok(base);
        }

        self.advance();
        self.descend()?;
        let exponent = self.parse_unary();
        self.depth -= 1;

        Ok(Expression::BinaryOp {
            left: Box::new(base),
            op: BinaryOperator::Power,
            right: Box::new(exponent?),
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let expr = match self.current().clone() {
            Token::Number(value) => {
                self.advance();
                Expression::Number(value)
            }
            Token::Identifier(name) => {
                self.advance();
                if *self.current() == Token::LParen {
                    self.parse_call(name)?
                } else {
                    Expression::Identifier(name)
                }
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                inner
            }
            _ => return Err(self.unexpected("where a value was expected")),
        };

        if *self.current() == Token::LParen {
            return Err(EvalError::unsupported("only named functions can be called"));
        }

        Ok(expr)
    }

    /// Parses the argument list of `name(...)`; the current token is `(`.
    fn parse_call(&mut self, name: String) -> ParseResult<Expression> {
        self.advance();

        let mut args = Vec::new();
        if *self.current() != Token::RParen {
            loop {
                args.push(self.parse_expression()?);
                if *self.current() != Token::Comma {
                    break;
                }
                self.advance();
            }
        }
        self.expect(Token::RParen)?;

        Ok(Expression::Call { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> Box<Expression> {
        Box::new(Expression::Number(value))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            Expression::BinaryOp {
                left: num(1.0),
                op: BinaryOperator::Add,
                right: Box::new(Expression::BinaryOp {
                    left: num(2.0),
                    op: BinaryOperator::Multiply,
                    right: num(3.0),
                }),
            }
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2 ^ 3 ^ 2").unwrap(),
            Expression::BinaryOp {
                left: num(2.0),
                op: BinaryOperator::Power,
                right: Box::new(Expression::BinaryOp {
                    left: num(3.0),
                    op: BinaryOperator::Power,
                    right: num(2.0),
                }),
            }
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(
            parse("-2^2").unwrap(),
            Expression::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(Expression::BinaryOp {
                    left: num(2.0),
                    op: BinaryOperator::Power,
                    right: num(2.0),
                }),
            }
        );
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(
            parse("2^-1").unwrap(),
            Expression::BinaryOp {
                left: num(2.0),
                op: BinaryOperator::Power,
                right: Box::new(Expression::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: num(1.0),
                }),
            }
        );
    }

    #[test]
    fn test_function_call_arguments() {
        assert_eq!(
            parse("log(8, 2)").unwrap(),
            Expression::Call {
                name: "log".into(),
                args: vec![Expression::Number(8.0), Expression::Number(2.0)],
            }
        );
        assert_eq!(
            parse("sin()").unwrap(),
            Expression::Call {
                name: "sin".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_unknown_names_still_parse() {
        assert_eq!(parse("bad").unwrap(), Expression::Identifier("bad".into()));
        assert!(parse("nope(1)").is_ok());
    }

    #[test]
    fn test_malformed_input_is_invalid() {
        for input in ["1 +", "(1", "1)", "bad input", "2 3", "$", "sin(1,)", "*2"] {
            assert!(
                matches!(parse(input), Err(EvalError::InvalidExpression(_))),
                "{input} should be invalid"
            );
        }
    }

    #[test]
    fn test_foreign_constructs_are_unsupported() {
        for input in [
            "1 << 2",
            "~1",
            "[1, 2]",
            "(lambda x: x)(1)",
            "__import__('os')",
            "log(x=1)",
            "math.pi",
            "1 < 2",
            "(sin)(1)",
            "abs(1)(2)",
            "2(3)",
            "not 1",
            "1 if 2 else 3",
            "1 and 2",
            "1 or 0",
            "1 is 1",
            "x for x in y",
        ] {
            assert!(
                matches!(parse(input), Err(EvalError::UnsupportedExpression(_))),
                "{input} should be unsupported"
            );
        }
    }

    #[test]
    fn test_keyword_argument_message() {
        assert_eq!(
            parse("log(x=1)"),
            Err(EvalError::UnsupportedExpression(
                "keyword arguments are not supported".into()
            ))
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(matches!(parse(&deep), Err(EvalError::InvalidExpression(_))));

        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse(&shallow).unwrap(), Expression::Number(1.0));

        let minuses = format!("{}1", "-".repeat(MAX_DEPTH * 2));
        assert!(parse(&minuses).is_err());
    }

    #[test]
    fn test_operator_chains_count_toward_depth() {
        let sum = format!("{}1", "1+".repeat(200));
        assert!(parse(&sum).is_ok());

        let mixed = format!("{}1", "2*3+".repeat(100));
        assert!(parse(&mixed).is_ok());

        for chain in ["1+", "1*", "1//"] {
            let long = format!("{}1", chain.repeat(10_000));
            assert_eq!(
                parse(&long),
                Err(EvalError::invalid("expression is nested too deeply"))
            );
        }
    }

    #[test]
    fn test_reserved_word_message() {
        assert_eq!(
            parse("not 1"),
            Err(EvalError::UnsupportedExpression("'not' is not allowed".into()))
        );
    }
}
