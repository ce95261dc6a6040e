//! Tree-walking evaluator.
//!
//! This is the sandbox boundary: constants, operators and functions are
//! resolved exclusively through the [`EvaluationConfig`] lookups. Anything
//! missing from the configuration is an error, never a fallback.

use tracing::trace;

use super::ast::Expression;
use super::config::{EvaluationConfig, default_config};
use super::error::EvalError;
use super::normalize::normalize;
use super::parser::parse;

/// Evaluate an expression against the default configuration.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    evaluate_with(expression, default_config())
}

/// Evaluate an expression against a custom configuration.
///
/// Runs the full pipeline: normalize, parse, then reduce the tree.
pub fn evaluate_with(expression: &str, config: &EvaluationConfig) -> Result<f64, EvalError> {
    let normalized = normalize(expression)?;
    trace!(expression = %normalized, "evaluating");

    let tree = parse(&normalized)?;
    Evaluator::new(config).eval(&tree)
}

/// Reduces a parsed tree to a number.
pub struct Evaluator<'a> {
    config: &'a EvaluationConfig,
}

impl<'a> Evaluator<'a> {
    pub fn new(config: &'a EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn eval(&self, expr: &Expression) -> Result<f64, EvalError> {
        match expr {
            Expression::Number(value) => Ok(*value),

            Expression::Identifier(name) => self
                .config
                .constant(name)
                .ok_or_else(|| EvalError::UnknownIdentifier(name.clone())),

            Expression::UnaryOp { op, operand } => {
                let apply = self
                    .config
                    .unary_operator(*op)
                    .ok_or_else(|| EvalError::UnsupportedOperator(format!("unary {}", op)))?;
                Ok(apply(self.eval(operand)?))
            }

            Expression::BinaryOp { left, op, right } => {
                let apply = self
                    .config
                    .binary_operator(*op)
                    .ok_or_else(|| EvalError::UnsupportedOperator(op.to_string()))?;
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(apply(left, right))
            }

            Expression::Call { name, args } => self.eval_call(name, args),
        }
    }

    fn eval_call(&self, name: &str, args: &[Expression]) -> Result<f64, EvalError> {
        let function = self
            .config
            .function(name)
            .ok_or_else(|| EvalError::UnsupportedFunction(name.to_string()))?;

        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<f64>, EvalError>>()?;

        function(values.as_slice()).map_err(|reason| EvalError::InvalidArguments {
            function: name.to_string(),
            reason,
        })
    }
}
