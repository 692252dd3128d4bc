//! Seams between the pipeline and the external tools it drives

use std::path::{Path, PathBuf};
use transync_core::git::{DiffStats, GitRepo};
use transync_core::Result;

/// Version-control operations the sync pipeline needs
pub trait VersionControl {
    /// Fail unless tracked files match HEAD
    fn require_clean_work_tree(&self) -> Result<()>;

    /// Refresh cached stat information in the index
    fn refresh_index(&self) -> Result<()>;

    /// Whether tracked files differ from the index
    fn has_unstaged_changes(&self) -> Result<bool>;

    /// Untracked files below `dir`, relative to the repository root
    fn untracked_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Commit every modified tracked file
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Human-readable `--stat` of the last commit
    fn last_commit_stat(&self) -> Result<String>;

    /// Parsed statistics of the last commit
    fn last_commit_stats(&self) -> Result<DiffStats>;

    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;
}

/// Translation platform operations
pub trait TranslationPlatform {
    /// Verify the client can be run at all
    fn check_available(&self) -> Result<()>;

    /// Download translations into the working tree
    fn pull(&self) -> Result<()>;

    /// Upload the current source strings
    fn push_sources(&self) -> Result<()>;
}

impl VersionControl for GitRepo {
    fn require_clean_work_tree(&self) -> Result<()> {
        GitRepo::require_clean_work_tree(self)
    }

    fn refresh_index(&self) -> Result<()> {
        GitRepo::refresh_index(self)
    }

    fn has_unstaged_changes(&self) -> Result<bool> {
        GitRepo::has_unstaged_changes(self)
    }

    fn untracked_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        GitRepo::untracked_files_in(self, dir)
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        GitRepo::commit_all(self, message)
    }

    fn last_commit_stat(&self) -> Result<String> {
        GitRepo::last_commit_stat(self)
    }

    fn last_commit_stats(&self) -> Result<DiffStats> {
        GitRepo::last_commit_stats(self)
    }

    fn current_branch(&self) -> Result<String> {
        GitRepo::current_branch(self)
    }
}
