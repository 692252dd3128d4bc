//! Core utilities for the transync translation sync tool
//!
//! This crate provides the building blocks the sync pipeline runs on:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Git operations**: Clean-tree checks, index refresh, untracked files, commits
//! - **Process execution**: Captured and streaming execution of external commands
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use transync_core::{config::Config, git::GitRepo};
//!
//! let repo = GitRepo::open_current().expect("Not a git repo");
//! let config = Config::load(None, repo.workdir()).expect("Bad config");
//!
//! repo.require_clean_work_tree().expect("Working tree is dirty");
//! let new = repo
//!     .untracked_files_in(&config.schema.repository.translations_dir)
//!     .expect("git status failed");
//! println!("{} new translation files", new.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod git;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::git::{DiffStats, GitRepo};
}
