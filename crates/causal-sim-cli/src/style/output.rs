//! Output helper functions for consistent styled messages.

use super::colors::SemanticStyle;

/// Prints a success message with a checkmark.
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".success(), msg);
}

/// Prints an error message with an X mark.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".error(), msg);
}

/// Prints a warning message with a warning symbol.
pub fn print_warn(msg: &str) {
    println!("{} {}", "⚠".warning(), msg);
}

/// Prints a hint/suggestion with an arrow.
pub fn print_hint(msg: &str) {
    println!("{} {}", "→".muted(), msg.muted());
}

/// Prints a section title.
pub fn print_title(msg: &str) {
    println!("{}", msg.header());
}

/// Prints an empty line for spacing.
pub fn print_spacer() {
    println!();
}

/// Formats a statistic with a fixed number of decimals.
pub fn fmt_stat(value: f64) -> String {
    format!("{value:.3}")
}
