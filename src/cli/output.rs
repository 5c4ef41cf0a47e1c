//! Console output helpers shared by the panel commands.

use std::fmt::Display;

const RULE_WIDTH: usize = 48;

/// Section header followed by a horizontal rule.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Aligned key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<12} {value}");
}

/// Success line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Warning line.
pub fn warn(message: &str) {
    println!("⚠ {message}");
}

/// Error line, on stderr.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}

/// Plain informational line.
pub fn note(message: &str) {
    println!("{message}");
}
