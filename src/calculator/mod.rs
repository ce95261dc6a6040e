//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Normalize input (strip digit-grouping commas)
//! - Parse expressions into a closed AST
//! - Evaluate the AST against an allow-list configuration
//! - Format results for display and the clipboard
//! - Process whole buffers line by line
//!
//! PIPELINE: Text --> normalize --> Lexer --> Parser --> AST --> Evaluator --> format

pub mod ast;
mod batch;
mod clipboard;
mod config;
mod error;
mod evaluator;
mod format;
mod lexer;
mod normalize;
mod parser;
mod token;

pub use ast::{BinaryOperator, Expression, UnaryOperator};
pub use batch::{
    Calculation, calculate_lines, evaluate_lines, evaluate_lines_with, render_results,
    render_results_with, render_text,
};
pub use clipboard::{copy_to_clipboard, last_clipboard_value};
pub use config::{
    BinaryFn, EvaluationConfig, EvaluationConfigBuilder, MathFunction, UnaryFn, default_config,
    floor_divide, floor_modulo, single_argument,
};
pub use error::EvalError;
pub use evaluator::{Evaluator, evaluate, evaluate_with};
pub use format::{format_number, format_plain};
pub use lexer::{RESERVED_WORDS, is_reserved_word};
pub use normalize::normalize;
pub use parser::{MAX_DEPTH, parse};
