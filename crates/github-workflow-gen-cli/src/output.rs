//! Terminal output formatting for the github-workflow-gen CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use console::style;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]` to stderr.
pub fn print_error(text: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}
