//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Colors are only emitted
//! when the target stream is a terminal.

use owo_colors::{OwoColorize, Stream};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!(
            "{} {}",
            "✓".if_supports_color(Stream::Stdout, |t| t.green()),
            message
        );
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!(
            "{} {}",
            "✗".if_supports_color(Stream::Stderr, |t| t.red()),
            message
        );
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!(
            "{} {}",
            "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()),
            message
        );
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!(
            "{} {}",
            "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()),
            message
        );
    }

    /// Print a step message (for multi-step operations)
    pub fn step(step: usize, total: usize, message: &str) {
        let counter = format!("[{step}/{total}]");
        println!(
            "{} {}",
            counter.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            message.if_supports_color(Stream::Stdout, |t| t.bold())
        );
    }

    /// Print a block of text indented under the previous status line
    pub fn block(text: &str) {
        for line in text.lines() {
            println!("    {line}");
        }
    }

    /// Print a block of guidance to stderr, indented
    pub fn guidance(text: &str) {
        for line in text.lines() {
            eprintln!("    {line}");
        }
    }
}

/// Format a count with singular/plural
#[must_use]
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
