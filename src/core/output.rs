//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Every command prints through these helpers so errors, confirmations and
//! notices look the same everywhere: red for errors, green for success,
//! blue for headings and bright_black for hints.

use colored::*;

/// Formats and prints an error message
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message surrounded by blank lines
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a muted hint line (usage tips, retry suggestions)
pub fn print_hint(message: &str) {
    println!("{}", message.bright_black());
}

/// Formats and prints a section header
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.blue());
}
