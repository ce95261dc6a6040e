//! Allow-list of operators, constants and functions an evaluation may use.
//!
//! An [`EvaluationConfig`] is the only place the evaluator resolves names
//! and operators. It is built once through [`EvaluationConfigBuilder`] and
//! never changes afterwards, so a single instance can be shared freely
//! between threads.

use std::collections::HashMap;
use std::f64::consts::{E, PI, TAU};
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;

use super::ast::{BinaryOperator, UnaryOperator};

/// A binary arithmetic operation.
pub type BinaryFn = fn(f64, f64) -> f64;

/// A unary arithmetic operation.
pub type UnaryFn = fn(f64) -> f64;

/// A callable exposed to expressions.
///
/// Receives the evaluated positional arguments. An `Err` carries the reason
/// the arguments were refused and surfaces as `InvalidArguments`.
pub type MathFunction = Arc<dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync>;

lazy_static! {
    static ref DEFAULT_CONFIG: EvaluationConfig = EvaluationConfig::default();
}

/// The process-wide default configuration.
pub fn default_config() -> &'static EvaluationConfig {
    &DEFAULT_CONFIG
}

/// Immutable table of everything an expression is allowed to touch.
#[derive(Clone)]
pub struct EvaluationConfig {
    binary_operators: HashMap<BinaryOperator, BinaryFn>,
    unary_operators: HashMap<UnaryOperator, UnaryFn>,
    constants: HashMap<String, f64>,
    functions: HashMap<String, MathFunction>,
}

impl EvaluationConfig {
    /// Start an empty configuration that allows nothing.
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    /// Start a builder pre-filled with this configuration's entries.
    pub fn to_builder(&self) -> EvaluationConfigBuilder {
        EvaluationConfigBuilder {
            config: self.clone(),
        }
    }

    pub fn binary_operator(&self, op: BinaryOperator) -> Option<BinaryFn> {
        self.binary_operators.get(&op).copied()
    }

    pub fn unary_operator(&self, op: UnaryOperator) -> Option<UnaryFn> {
        self.unary_operators.get(&op).copied()
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&MathFunction> {
        self.functions.get(name)
    }

    /// Names of the configured constants, sorted.
    pub fn constant_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of the configured functions, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for EvaluationConfig {
    /// Four operator groups, `pi`/`tau`/`e`, and the basic math functions.
    fn default() -> Self {
        EvaluationConfig::builder()
            .binary_operator(BinaryOperator::Add, |l, r| l + r)
            .binary_operator(BinaryOperator::Subtract, |l, r| l - r)
            .binary_operator(BinaryOperator::Multiply, |l, r| l * r)
            .binary_operator(BinaryOperator::Divide, |l, r| l / r)
            .binary_operator(BinaryOperator::FloorDivide, floor_divide)
            .binary_operator(BinaryOperator::Modulo, floor_modulo)
            .binary_operator(BinaryOperator::Power, f64::powf)
            .unary_operator(UnaryOperator::Plus, |v| v)
            .unary_operator(UnaryOperator::Negate, |v| -v)
            .constant("pi", PI)
            .constant("tau", TAU)
            .constant("e", E)
            .function("sqrt", single_argument(f64::sqrt))
            .function("log", Arc::new(log))
            .function("sin", single_argument(f64::sin))
            .function("cos", single_argument(f64::cos))
            .function("tan", single_argument(f64::tan))
            .function("asin", single_argument(f64::asin))
            .function("acos", single_argument(f64::acos))
            .function("atan", single_argument(f64::atan))
            .function("abs", single_argument(f64::abs))
            .build()
    }
}

impl fmt::Debug for EvaluationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut binary: Vec<&str> = self.binary_operators.keys().map(|op| op.symbol()).collect();
        binary.sort_unstable();
        let mut unary: Vec<&str> = self.unary_operators.keys().map(|op| op.symbol()).collect();
        unary.sort_unstable();

        f.debug_struct("EvaluationConfig")
            .field("binary_operators", &binary)
            .field("unary_operators", &unary)
            .field("constants", &self.constant_names())
            .field("functions", &self.function_names())
            .finish()
    }
}

/// Collects entries for an [`EvaluationConfig`].
#[derive(Clone)]
pub struct EvaluationConfigBuilder {
    config: EvaluationConfig,
}

impl Default for EvaluationConfigBuilder {
    fn default() -> Self {
        Self {
            config: EvaluationConfig {
                binary_operators: HashMap::new(),
                unary_operators: HashMap::new(),
                constants: HashMap::new(),
                functions: HashMap::new(),
            },
        }
    }
}

impl EvaluationConfigBuilder {
    pub fn binary_operator(mut self, op: BinaryOperator, func: BinaryFn) -> Self {
        self.config.binary_operators.insert(op, func);
        self
    }

    pub fn unary_operator(mut self, op: UnaryOperator, func: UnaryFn) -> Self {
        self.config.unary_operators.insert(op, func);
        self
    }

    /// Add or replace a named constant.
    pub fn constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.config.constants.insert(name.into(), value);
        self
    }

    /// Add or replace a named function.
    pub fn function(mut self, name: impl Into<String>, func: MathFunction) -> Self {
        self.config.functions.insert(name.into(), func);
        self
    }

    pub fn without_binary_operator(mut self, op: BinaryOperator) -> Self {
        self.config.binary_operators.remove(&op);
        self
    }

    pub fn without_unary_operator(mut self, op: UnaryOperator) -> Self {
        self.config.unary_operators.remove(&op);
        self
    }

    pub fn without_constant(mut self, name: &str) -> Self {
        self.config.constants.remove(name);
        self
    }

    pub fn without_function(mut self, name: &str) -> Self {
        self.config.functions.remove(name);
        self
    }

    pub fn build(self) -> EvaluationConfig {
        self.config
    }
}

/// Wrap a one-argument float function, rejecting any other arity.
pub fn single_argument(func: fn(f64) -> f64) -> MathFunction {
    Arc::new(move |args: &[f64]| match args {
        [value] => Ok(func(*value)),
        _ => Err(format!("expected exactly one argument, got {}", args.len())),
    })
}

/// Natural logarithm, or logarithm in the given base with a second argument.
fn log(args: &[f64]) -> Result<f64, String> {
    match args {
        [value] => Ok(value.ln()),
        [value, base] => Ok(value.ln() / base.ln()),
        _ => Err(format!("expected one or two arguments, got {}", args.len())),
    }
}

/// Floor of the exact quotient `left / right`.
///
/// Derived from the remainder rather than `(left / right).floor()`, which
/// can round the quotient up across an integer boundary (`1 // 0.1` is 9,
/// not 10).
pub fn floor_divide(left: f64, right: f64) -> f64 {
    if right == 0.0 {
        return (left / right).floor();
    }

    let modulo = left % right;
    let mut div = (left - modulo) / right;
    if modulo != 0.0 && ((right < 0.0) != (modulo < 0.0)) {
        div -= 1.0;
    }

    if div == 0.0 {
        return 0.0_f64.copysign(left / right);
    }

    let floor = div.floor();
    if div - floor > 0.5 { floor + 1.0 } else { floor }
}

/// Remainder whose sign follows the divisor, consistent with [`floor_divide`].
pub fn floor_modulo(left: f64, right: f64) -> f64 {
    let modulo = left % right;
    if modulo == 0.0 {
        return 0.0_f64.copysign(right);
    }
    if (right < 0.0) != (modulo < 0.0) {
        modulo + right
    } else {
        modulo
    }
}
