//! Abstract syntax tree for calculator expressions.
//!
//! The tree is closed: these are the only node kinds the parser can build
//! and the only ones the evaluator knows how to reduce.

use std::fmt;

/// A parsed expression. Each node owns its children.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A numeric literal, already converted to `f64`.
    Number(f64),

    /// A bare name such as `pi`. Resolved against the configured constants.
    Identifier(String),

    /// A unary operation: op operand (e.g., -5).
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// A binary operation: left op right (e.g., 5 + 3).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// A call of a named function with positional arguments, e.g. `sqrt(2)`.
    Call { name: String, args: Vec<Expression> },
}

/// Binary operators the grammar can express.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
}

/// Unary operators the grammar can express.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::FloorDivide => "//",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Negate => "-",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
