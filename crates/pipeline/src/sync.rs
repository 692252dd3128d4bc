//! The sync pipeline
//!
//! A run is a fixed sequence: require a clean tree, check tooling, pull and
//! commit, stop if new languages appeared, push sources, pull again and
//! commit. Every external failure ends the run immediately; nothing is rolled
//! back.

use crate::backend::{TranslationPlatform, VersionControl};
use crate::report::{Reporter, Step, SyncEvent};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use transync_core::config::ConfigSchema;
use transync_core::error::{Error, Result, ResultExt};
use transync_core::git::DiffStats;

/// What the pipeline needs from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Translations directory, relative to the repository root
    pub translations_dir: PathBuf,
    /// Resolved sibling checkout that must exist, if any
    pub sibling_checkout: Option<PathBuf>,
    /// Commit message after step 1
    pub pull_message: String,
    /// Commit message after step 3
    pub push_message: String,
}

impl SyncSettings {
    /// Extract settings from a loaded config for the repository at `root`
    #[must_use]
    pub fn from_config(schema: &ConfigSchema, root: &std::path::Path) -> Self {
        Self {
            translations_dir: schema.repository.translations_dir.clone(),
            sibling_checkout: schema.repository.sibling_checkout_path(root),
            pull_message: schema.commit.pull_message.clone(),
            push_message: schema.commit.push_message.clone(),
        }
    }
}

/// Result of a committing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The working tree changed and was committed
    Committed {
        /// Commit message used
        message: String,
        /// Size of the commit
        stats: DiffStats,
    },
    /// Nothing changed
    NoChanges,
}

impl StepOutcome {
    /// Whether a commit was made
    #[must_use]
    pub fn committed(&self) -> bool {
        matches!(self, StepOutcome::Committed { .. })
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// All three steps ran
    Completed {
        /// Step 1
        pulled: StepOutcome,
        /// Step 3
        refreshed: StepOutcome,
    },
    /// Step 2 found untracked translation files; step 3 was not run
    NewLanguages {
        /// Step 1
        pulled: StepOutcome,
        /// Untracked files, relative to the repository root
        files: Vec<PathBuf>,
    },
}

impl SyncOutcome {
    /// Whether the operator has to act before the next run
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        matches!(self, SyncOutcome::NewLanguages { .. })
    }

    /// Number of commits the run created
    #[must_use]
    pub fn commit_count(&self) -> usize {
        match self {
            SyncOutcome::Completed { pulled, refreshed } => {
                usize::from(pulled.committed()) + usize::from(refreshed.committed())
            }
            SyncOutcome::NewLanguages { pulled, .. } => usize::from(pulled.committed()),
        }
    }
}

/// Drives the version-control and translation tools through one sync
pub struct SyncPipeline<'a, V, P> {
    vcs: &'a V,
    platform: &'a P,
    settings: SyncSettings,
}

impl<'a, V: VersionControl, P: TranslationPlatform> SyncPipeline<'a, V, P> {
    /// Create a pipeline over the given collaborators
    pub fn new(vcs: &'a V, platform: &'a P, settings: SyncSettings) -> Self {
        Self {
            vcs,
            platform,
            settings,
        }
    }

    /// Run the whole sync
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<SyncOutcome> {
        self.vcs.require_clean_work_tree()?;
        self.preflight()?;

        let pulled = self.pull_translations(reporter)?;

        let files = self.detect_new_languages(reporter)?;
        if !files.is_empty() {
            info!(count = files.len(), "stopping for new languages");
            return Ok(SyncOutcome::NewLanguages { pulled, files });
        }

        let refreshed = self.push_sources(reporter)?;
        Ok(SyncOutcome::Completed { pulled, refreshed })
    }

    fn preflight(&self) -> Result<()> {
        self.platform
            .check_available()
            .context("Checking for the translation client")?;

        if let Some(sibling) = &self.settings.sibling_checkout {
            if !sibling.is_dir() {
                return Err(Error::directory_not_found(sibling)
                    .with_context("The related project must be checked out next to this one")
                    .with_suggestion(
                        "Clone it there, or point repository.sibling_checkout at its location",
                    ));
            }
            debug!(path = %sibling.display(), "sibling checkout present");
        }

        Ok(())
    }

    fn pull_translations(&self, reporter: &mut dyn Reporter) -> Result<StepOutcome> {
        reporter.report(SyncEvent::StepStarted(Step::Pull));
        self.platform.pull()?;

        let outcome = self.commit_if_changed(Step::Pull, &self.settings.pull_message, reporter)?;
        if outcome.committed() {
            reporter.report(SyncEvent::Guidance(
                "Review the translation changes above. They are committed locally;\n\
                 push them together with your next change."
                    .to_string(),
            ));
        }
        Ok(outcome)
    }

    fn detect_new_languages(&self, reporter: &mut dyn Reporter) -> Result<Vec<PathBuf>> {
        reporter.report(SyncEvent::StepStarted(Step::DetectLanguages));
        self.vcs.refresh_index()?;

        let dir = &self.settings.translations_dir;
        let files = self.vcs.untracked_files_in(dir)?;
        if files.is_empty() {
            reporter.report(SyncEvent::NoChanges(Step::DetectLanguages));
            return Ok(files);
        }

        reporter.report(SyncEvent::NewLanguages {
            dir: dir.clone(),
            files: files.clone(),
        });
        reporter.report(SyncEvent::Guidance(format!(
            "The translation platform has languages this project does not know yet.\n\
             Register each new language with the project, add its file to {} with\n\
             `git add`, commit, and run the sync again. Source strings were not pushed.",
            dir.display()
        )));
        Ok(files)
    }

    fn push_sources(&self, reporter: &mut dyn Reporter) -> Result<StepOutcome> {
        reporter.report(SyncEvent::StepStarted(Step::PushSources));
        self.platform.push_sources()?;
        self.platform.pull()?;

        let outcome =
            self.commit_if_changed(Step::PushSources, &self.settings.push_message, reporter)?;
        if outcome.committed() {
            let branch = self.vcs.current_branch()?;
            reporter.report(SyncEvent::Guidance(format!(
                "Source strings are now live on the translation platform. Rebase this\n\
                 commit onto upstream and push it promptly, so the project and the\n\
                 platform agree:\n\n    git pull --rebase && git push origin {branch}"
            )));
        }
        Ok(outcome)
    }

    fn commit_if_changed(
        &self,
        step: Step,
        message: &str,
        reporter: &mut dyn Reporter,
    ) -> Result<StepOutcome> {
        self.vcs.refresh_index()?;
        if !self.vcs.has_unstaged_changes()? {
            reporter.report(SyncEvent::NoChanges(step));
            return Ok(StepOutcome::NoChanges);
        }

        self.vcs.commit_all(message)?;
        let stat = self.vcs.last_commit_stat()?;
        let stats = self.vcs.last_commit_stats()?;
        info!(?step, files = stats.files_changed, "committed");

        reporter.report(SyncEvent::Committed {
            step,
            message: message.to_string(),
            stat,
            stats,
        });
        Ok(StepOutcome::Committed {
            message: message.to_string(),
            stats,
        })
    }
}
