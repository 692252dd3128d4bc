//! Terminal output helpers for transync
//!
//! Provides consistent status lines and count formatting for the CLI.

#![warn(missing_docs)]

pub mod output;
