//! Clipboard functionality for copying calculator results.

use anyhow::{Context, Result};
use arboard::Clipboard;

use super::batch::Calculation;

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;

    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")
}

/// The text to copy for a batch: the raw value of the last line that has one.
pub fn last_clipboard_value(calculations: &[Calculation]) -> Option<&str> {
    calculations
        .iter()
        .rev()
        .find_map(|calc| calc.clipboard.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate_lines, default_config};

    #[test]
    fn test_last_value_skips_failed_lines() {
        let calcs = calculate_lines(["1,000 * 2", "", "oops"], default_config());
        assert_eq!(last_clipboard_value(&calcs), Some("2000"));
    }

    #[test]
    fn test_nothing_to_copy() {
        let calcs = calculate_lines(["", "bad input"], default_config());
        assert_eq!(last_clipboard_value(&calcs), None);
    }
}
