//! Line-by-line evaluation for display.
//!
//! Each input line maps to exactly one output slot, in order. Blank lines
//! and lines that fail to evaluate produce an empty slot; the reason is
//! dropped here on purpose so a half-typed line just shows no result.

use serde::Serialize;

use super::config::{EvaluationConfig, default_config};
use super::evaluator::evaluate_with;
use super::format::{format_number, format_plain};

/// Result of one input line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Calculation {
    /// The input line, trimmed.
    pub expression: String,
    /// The numeric value, absent for blank or failed lines.
    pub value: Option<f64>,
    /// Formatted for display (with thousand separators), empty when absent.
    pub display: String,
    /// Formatted for clipboard (raw number), absent when there is no value.
    pub clipboard: Option<String>,
}

impl Calculation {
    fn from_line(line: &str, config: &EvaluationConfig) -> Self {
        let expression = line.trim().to_string();
        // Blank lines never reach the evaluator.
        let value = if expression.is_empty() {
            None
        } else {
            evaluate_with(&expression, config).ok()
        };

        Self {
            display: value.map(format_number).unwrap_or_default(),
            clipboard: value.map(format_plain),
            expression,
            value,
        }
    }

    /// Check if this line produced a value.
    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }
}

/// Evaluate every line against `config`, keeping the full result per line.
pub fn calculate_lines<I, S>(lines: I, config: &EvaluationConfig) -> Vec<Calculation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| Calculation::from_line(line.as_ref(), config))
        .collect()
}

/// Evaluate every line with the default configuration.
pub fn evaluate_lines<I, S>(lines: I) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    evaluate_lines_with(lines, default_config())
}

pub fn evaluate_lines_with<I, S>(lines: I, config: &EvaluationConfig) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    calculate_lines(lines, config)
        .into_iter()
        .map(|calc| calc.value)
        .collect()
}

/// Evaluate every line with the default configuration and format the results.
pub fn render_results<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    render_results_with(lines, default_config())
}

pub fn render_results_with<I, S>(lines: I, config: &EvaluationConfig) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    calculate_lines(lines, config)
        .into_iter()
        .map(|calc| calc.display)
        .collect()
}

/// Split a multi-line buffer and render one result per line.
pub fn render_text(text: &str) -> Vec<String> {
    render_results(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_results_formats_values() {
        assert_eq!(render_results(["2", "2.5", ""]), vec!["2", "2.5", ""]);
    }

    #[test]
    fn test_render_results_handles_functions() {
        assert_eq!(render_results(["sqrt(2)"]), vec!["1.41421"]);
    }

    #[test]
    fn test_render_results_suppresses_errors() {
        assert_eq!(render_results(["bad input"]), vec![""]);
        assert_eq!(render_results(["1 << 2", "abs(1, 2)", "nope"]), vec!["", "", ""]);
    }

    #[test]
    fn test_render_results_handles_infinite_numbers() {
        assert_eq!(render_results(["1e309", "-1e309"]), vec!["inf", "-inf"]);
    }

    #[test]
    fn test_render_results_supports_commas_in_input_and_output() {
        assert_eq!(render_results(["1,000 * 5"]), vec!["5,000"]);
        assert_eq!(render_results(["1234.5"]), vec!["1,234.5"]);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(render_results([""]), vec![""]);
        assert_eq!(evaluate_lines([""]), vec![None]);
    }

    #[test]
    fn test_evaluate_lines_handles_blanks_and_errors() {
        let results = evaluate_lines(["1 + 1", "  ", "bad", "tau / tau"]);
        assert_eq!(results, vec![Some(2.0), None, None, Some(1.0)]);
    }

    #[test]
    fn test_render_text_splits_input() {
        let text = "1 + 1\n\ninvalid\nsqrt(4)";
        assert_eq!(render_text(text), vec!["2", "", "", "2"]);
    }

    #[test]
    fn test_calculation_fields() {
        let calcs = calculate_lines(["  1000 / 3 ", "oops"], default_config());

        assert!(calcs[0].is_success());
        assert_eq!(calcs[0].expression, "1000 / 3");
        assert_eq!(calcs[0].display, "333.333");
        assert_eq!(calcs[0].clipboard.as_deref(), Some("333.3333333333333"));

        assert!(!calcs[1].is_success());
        assert_eq!(calcs[1].display, "");
        assert_eq!(calcs[1].clipboard, None);
    }

    #[test]
    fn test_custom_config_in_batch() {
        let config = default_config().to_builder().constant("g", 9.81).build();
        assert_eq!(
            render_results_with(["g * 2", "pi"], &config),
            vec!["19.62", "3.14159"]
        );
        assert_eq!(render_results(["g"]), vec![""]);
    }
}
