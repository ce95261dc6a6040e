//! Sandboxed line-by-line calculator.
//!
//! Evaluates free-form text lines as arithmetic over a fixed allow-list of
//! operators, constants and functions, and formats the results for display.
//!
//! ```
//! use mb_calc::calculator::{evaluate, render_results};
//!
//! assert_eq!(evaluate("1,000 * 5"), Ok(5000.0));
//! assert_eq!(render_results(["1,000 * 5", "", "oops"]), vec!["5,000", "", ""]);
//! ```

pub mod calculator;
pub mod config;
