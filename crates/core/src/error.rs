//! Structured error handling with context and recovery suggestions
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! carries:
//! - An [`ErrorCode`] for programmatic handling
//! - Optional context and a recovery suggestion for the operator
//! - A serializable [`ErrorReport`] form for `--format json`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // IO errors (2xxx)
    /// Any other I/O failure
    IoError = 2000,
    /// A file does not exist
    FileNotFound = 2001,
    /// Access was refused
    PermissionDenied = 2002,
    /// A directory does not exist
    DirectoryNotFound = 2004,

    // Configuration errors (3xxx)
    /// An explicitly requested config file is missing
    ConfigNotFound = 3001,
    /// The config file is not valid TOML for the schema
    ConfigParseError = 3002,
    /// A config value parsed but cannot be used
    ConfigValidationError = 3003,

    // Git errors (4xxx)
    /// The directory is not inside a git working tree
    NotAGitRepo = 4001,
    /// A git subcommand exited unsuccessfully
    GitCommandFailed = 4002,
    /// Tracked files differ from HEAD
    DirtyWorkTree = 4003,

    // Process errors (5xxx)
    /// A process could not be started
    ProcessError = 5000,
    /// A program is not on PATH
    CommandNotFound = 5001,
    /// A program exited with a non-zero status
    CommandFailed = 5002,
}

impl ErrorCode {
    /// Get the numeric code
    #[must_use]
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            4 => "Git",
            5 => "Process",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {ctx}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    #[must_use]
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }

    // Convenience constructors

    /// Explicitly requested configuration file is missing
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .transync.toml file or drop the --config flag to use defaults")
    }

    /// Configuration value failed validation
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Configured directory does not exist
    pub fn directory_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::DirectoryNotFound,
            format!("Directory not found: {}", path.as_ref().display()),
        )
    }

    /// Not inside a git working tree
    pub fn not_a_git_repo() -> Self {
        Self::new(ErrorCode::NotAGitRepo, "Not a git repository")
            .with_suggestion("Run this command from within a git repository or pass --repo")
    }

    /// A git subcommand exited unsuccessfully
    pub fn git_command_failed(args: &[&str], stderr: &str) -> Self {
        let err = Self::new(
            ErrorCode::GitCommandFailed,
            format!("git {} failed", args.join(" ")),
        );
        let stderr = stderr.trim();
        if stderr.is_empty() {
            err
        } else {
            err.with_context(stderr.to_string())
        }
    }

    /// Tracked files have uncommitted changes
    pub fn dirty_work_tree(detail: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DirtyWorkTree,
            format!("Cannot sync translations: {}", detail.into()),
        )
        .with_suggestion("Commit or stash your changes, then run again")
    }

    /// Generic process failure
    pub fn process(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessError, message)
    }

    /// Required program is not on PATH
    pub fn command_not_found(cmd: &str) -> Self {
        Self::new(
            ErrorCode::CommandNotFound,
            format!("Command not found: {cmd}"),
        )
        .with_suggestion(format!("Install {cmd} and ensure it's in your PATH"))
    }

    /// External command exited with a non-zero status
    pub fn command_failed(command: &str, exit_code: i32) -> Self {
        Self::new(
            ErrorCode::CommandFailed,
            format!("`{command}` exited with status {exit_code}"),
        )
    }
}

/// Serializable error report for logging and machine-readable output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Code rendered as `E4003`
    pub code_str: String,
    /// Category of the code
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Rendered source error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for the CLI
pub mod exit_codes {
    /// Sync finished, or there was nothing to do
    pub const SUCCESS: i32 = 0;
    /// Precondition failure, external command failure, or a new language
    /// that needs manual follow-up
    pub const FAILURE: i32 = 1;
    /// Invalid command-line usage, as reported by the argument parser
    pub const USAGE: i32 = 2;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
