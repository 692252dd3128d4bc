//! Translation sync pipeline
//!
//! Pulls translations from the translation platform, stops when new
//! languages appear, pushes source strings, and commits whatever changed.
//! The version-control system and the translation client sit behind the
//! [`VersionControl`] and [`TranslationPlatform`] traits.
//!
//! # Example
//!
//! ```rust,no_run
//! use transync_core::{config::Config, git::GitRepo};
//! use transync_pipeline::{CommandClient, RecordingReporter, SyncPipeline, SyncSettings};
//!
//! let repo = GitRepo::open_current().expect("Not a git repo");
//! let config = Config::load(None, repo.workdir()).expect("Bad config");
//! let client = CommandClient::new(&config.schema.platform, repo.workdir());
//! let settings = SyncSettings::from_config(&config.schema, repo.workdir());
//!
//! let mut reporter = RecordingReporter::default();
//! let outcome = SyncPipeline::new(&repo, &client, settings)
//!     .run(&mut reporter)
//!     .expect("sync failed");
//! println!("{} commits", outcome.commit_count());
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod client;
pub mod report;
pub mod sync;

pub use backend::{TranslationPlatform, VersionControl};
pub use client::CommandClient;
pub use report::{RecordingReporter, Reporter, Step, SyncEvent};
pub use sync::{StepOutcome, SyncOutcome, SyncPipeline, SyncSettings};
