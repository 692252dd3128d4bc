//! Progress events emitted while the pipeline runs

use serde::Serialize;
use std::path::PathBuf;
use transync_core::git::DiffStats;

/// The three steps of a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Download translations and commit them
    Pull,
    /// Look for translation files of languages the project doesn't know yet
    DetectLanguages,
    /// Upload source strings, download again and commit
    PushSources,
}

impl Step {
    /// Number of steps in a full run
    pub const TOTAL: usize = 3;

    /// 1-based position in the run
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Step::Pull => 1,
            Step::DetectLanguages => 2,
            Step::PushSources => 3,
        }
    }

    /// Heading printed when the step starts
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Step::Pull => "Pulling translations",
            Step::DetectLanguages => "Checking for new languages",
            Step::PushSources => "Pushing source strings and pulling again",
        }
    }

    /// Label for the commit check, completed with "none." when nothing changed
    #[must_use]
    pub fn commit_label(self) -> &'static str {
        match self {
            Step::Pull => "Committing pulled translations...",
            Step::DetectLanguages => "Looking for untracked translation files...",
            Step::PushSources => "Committing refreshed translations...",
        }
    }
}

/// Something the operator should see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A step began
    StepStarted(Step),
    /// The step's check found nothing to do
    NoChanges(Step),
    /// The step committed the working tree
    Committed {
        /// Step that made the commit
        step: Step,
        /// Commit message
        message: String,
        /// `git show --stat` of the commit
        stat: String,
        /// Parsed totals of the commit
        stats: DiffStats,
    },
    /// Untracked files showed up in the translations directory
    NewLanguages {
        /// Translations directory, relative to the repository root
        dir: PathBuf,
        /// The untracked files
        files: Vec<PathBuf>,
    },
    /// Follow-up instructions for the operator
    Guidance(String),
}

/// Receives pipeline events
pub trait Reporter {
    /// Handle one event
    fn report(&mut self, event: SyncEvent);
}

/// Keeps every event, for callers that render after the run
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Events in emission order
    pub events: Vec<SyncEvent>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: SyncEvent) {
        self.events.push(event);
    }
}
