//! Translation client driven through its command-line interface

use crate::backend::TranslationPlatform;
use std::path::{Path, PathBuf};
use tracing::info;
use transync_core::config::PlatformConfig;
use transync_core::error::{Error, Result, ResultExt};
use transync_core::process::{
    display_command, run_command_streaming_in_dir, run_command_streaming_to_stderr_in_dir,
    which_command,
};

/// Runs the configured client program in the repository root
#[derive(Debug, Clone)]
pub struct CommandClient {
    program: String,
    pull_args: Vec<String>,
    push_args: Vec<String>,
    workdir: PathBuf,
    stdout_to_stderr: bool,
}

impl CommandClient {
    /// Build a client from the `[platform]` settings
    #[must_use]
    pub fn new(config: &PlatformConfig, workdir: &Path) -> Self {
        Self {
            program: config.program.clone(),
            pull_args: config.pull_args.clone(),
            push_args: config.push_args.clone(),
            workdir: workdir.to_path_buf(),
            stdout_to_stderr: false,
        }
    }

    /// Send the client's stdout to stderr, keeping stdout free for a report
    #[must_use]
    pub fn with_stdout_to_stderr(mut self) -> Self {
        self.stdout_to_stderr = true;
        self
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let command = display_command(&self.program, args);
        info!(%command, "invoking translation client");

        let code = if self.stdout_to_stderr {
            run_command_streaming_to_stderr_in_dir(&self.program, args, &self.workdir)?
        } else {
            run_command_streaming_in_dir(&self.program, args, &self.workdir)?
        };
        if code == 0 {
            Ok(())
        } else {
            Err(Error::command_failed(&command, code))
        }
    }
}

impl TranslationPlatform for CommandClient {
    fn check_available(&self) -> Result<()> {
        match which_command(&self.program) {
            Some(path) => {
                info!(path = %path.display(), "found translation client");
                Ok(())
            }
            None => Err(Error::command_not_found(&self.program)),
        }
    }

    fn pull(&self) -> Result<()> {
        self.run(&self.pull_args)
            .context("Pulling translations from the translation platform")
    }

    fn push_sources(&self) -> Result<()> {
        self.run(&self.push_args)
            .context("Pushing source strings to the translation platform")
    }
}
