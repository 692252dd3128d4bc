//! Git operations using command-line git
//!
//! Uses command-line git to avoid dependency issues with git2/libgit2, and
//! because the sync workflow only needs a handful of plumbing commands.

use crate::error::{Error, Result};
use crate::process::{run_command_in_dir, CommandResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Git repository wrapper
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Open a git repository at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::directory_not_found(path));
        }

        let result = run_command_in_dir("git", &["rev-parse", "--show-toplevel"], path)?;
        if !result.success {
            return Err(Error::not_a_git_repo());
        }

        let workdir = PathBuf::from(result.stdout.trim());
        debug!(workdir = %workdir.display(), "opened repository");
        Ok(Self { workdir })
    }

    /// Open the repository in the current directory
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::open(&current_dir)
    }

    /// Get the repository working directory
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn git(&self, args: &[&str]) -> Result<CommandResult> {
        run_command_in_dir("git", args, &self.workdir)
    }

    fn git_checked(&self, args: &[&str]) -> Result<CommandResult> {
        let result = self.git(args)?;
        if result.success {
            Ok(result)
        } else {
            Err(Error::git_command_failed(args, &result.stderr))
        }
    }

    /// Run a `--quiet` diff command: exit 0 means no differences, 1 means
    /// differences, anything else is a failure
    fn git_differs(&self, args: &[&str]) -> Result<bool> {
        let result = self.git(args)?;
        match result.exit_code {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::git_command_failed(args, &result.stderr)),
        }
    }

    /// Refresh the index so stat-only changes don't show up as differences
    pub fn refresh_index(&self) -> Result<()> {
        self.git_checked(&["update-index", "-q", "--ignore-submodules", "--refresh"])?;
        Ok(())
    }

    /// Check for unstaged differences between the index and the working tree,
    /// including moved submodule commits
    pub fn has_unstaged_changes(&self) -> Result<bool> {
        self.git_differs(&["diff-files", "--quiet"])
    }

    /// Check for staged differences between HEAD and the index
    pub fn has_staged_changes(&self) -> Result<bool> {
        self.git_differs(&[
            "diff-index",
            "--cached",
            "--quiet",
            "--ignore-submodules",
            "HEAD",
            "--",
        ])
    }

    /// Fail unless tracked files match HEAD
    ///
    /// Untracked files are allowed, like git's own clean-tree check.
    pub fn require_clean_work_tree(&self) -> Result<()> {
        self.refresh_index()?;

        let unstaged = self.git_differs(&["diff-files", "--quiet", "--ignore-submodules"])?;
        let staged = self.has_staged_changes()?;

        match (unstaged, staged) {
            (false, false) => Ok(()),
            (true, false) => Err(Error::dirty_work_tree("you have unstaged changes")),
            (false, true) => Err(Error::dirty_work_tree(
                "your index contains uncommitted changes",
            )),
            (true, true) => Err(Error::dirty_work_tree(
                "you have unstaged changes and your index contains uncommitted changes",
            )),
        }
    }

    /// Get untracked files below `dir` (relative to the repository root)
    pub fn untracked_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let dir = dir.to_string_lossy();
        let result = self.git_checked(&[
            "status",
            "--porcelain",
            "-z",
            "--untracked-files=all",
            "--",
            &*dir,
        ])?;

        Ok(parse_untracked(&result.stdout))
    }

    /// Commit every modified tracked file
    pub fn commit_all(&self, message: &str) -> Result<()> {
        self.git_checked(&["commit", "--all", "--quiet", "--message", message])?;
        Ok(())
    }

    /// `--stat` summary of the HEAD commit
    pub fn last_commit_stat(&self) -> Result<String> {
        let result = self.git_checked(&["show", "--stat", "--format=", "HEAD"])?;
        Ok(result.stdout.trim_end().to_string())
    }

    /// Diff statistics of the HEAD commit
    pub fn last_commit_stats(&self) -> Result<DiffStats> {
        let result = self.git_checked(&["show", "--shortstat", "--format=", "HEAD"])?;
        Ok(DiffStats::parse_shortstat(&result.stdout))
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<String> {
        let result = self.git_checked(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(result.stdout.trim().to_string())
    }
}

/// Parse `status --porcelain -z` output, keeping only untracked entries
fn parse_untracked(stdout: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut entries = stdout.split('\0').filter(|e| !e.is_empty());

    while let Some(entry) = entries.next() {
        // Format: "XY path"; renames and copies carry the source path as the next entry
        if entry.len() < 4 {
            continue;
        }
        let (status, path) = entry.split_at(3);
        if status.starts_with("??") {
            files.push(PathBuf::from(path));
        } else if status.starts_with('R') || status.starts_with('C') {
            entries.next();
        }
    }

    files
}

/// Statistics from a git diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DiffStats {
    /// Number of files touched
    pub files_changed: usize,
    /// Lines added
    pub insertions: usize,
    /// Lines removed
    pub deletions: usize,
}

impl DiffStats {
    /// Parse shortstat output: " 3 files changed, 10 insertions(+), 5 deletions(-)"
    #[must_use]
    pub fn parse_shortstat(output: &str) -> Self {
        let mut stats = Self::default();

        for line in output.lines() {
            if !(line.contains("files changed") || line.contains("file changed")) {
                continue;
            }
            for part in line.split(',') {
                let part = part.trim();
                let Some(num) = part.split_whitespace().next() else {
                    continue;
                };
                let num = num.parse().unwrap_or(0);
                if part.contains("file") {
                    stats.files_changed = num;
                } else if part.contains("insertion") {
                    stats.insertions = num;
                } else if part.contains("deletion") {
                    stats.deletions = num;
                }
            }
        }

        stats
    }
}
