//! Text and JSON rendering of pipeline events

use serde::Serialize;
use transync_cli::output::{format_count, Status};
use transync_core::error::{ErrorReport, Result};
use transync_pipeline::{Reporter, Step, SyncEvent, SyncOutcome};

/// Prints events as they happen
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn report(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::StepStarted(step) => {
                println!();
                Status::step(step.number(), Step::TOTAL, step.title());
            }
            SyncEvent::NoChanges(step) => {
                println!("{} none.", step.commit_label());
            }
            SyncEvent::Committed {
                step,
                message,
                stat,
                stats,
            } => {
                println!("{}", step.commit_label());
                Status::success(&format!(
                    "Committed \"{message}\" ({})",
                    format_count(stats.files_changed, "file", "files")
                ));
                Status::block(&stat);
            }
            SyncEvent::NewLanguages { dir, files } => {
                Status::warning(&format!(
                    "Found {} in {}:",
                    format_count(files.len(), "untracked file", "untracked files"),
                    dir.display()
                ));
                for file in &files {
                    eprintln!("    {}", file.display());
                }
            }
            SyncEvent::Guidance(text) => {
                eprintln!();
                Status::guidance(&text);
            }
        }
    }
}

impl TerminalReporter {
    /// Closing line once the pipeline returned
    pub fn finish(&self, outcome: &SyncOutcome) {
        println!();
        match outcome {
            SyncOutcome::Completed { .. } if outcome.commit_count() == 0 => {
                Status::info("Translations are already in sync.");
            }
            SyncOutcome::Completed { .. } => Status::success(&format!(
                "Sync finished with {}.",
                format_count(outcome.commit_count(), "commit", "commits")
            )),
            SyncOutcome::NewLanguages { .. } => {
                Status::error("Stopped: new languages need manual follow-up.");
            }
        }
    }
}

/// Machine-readable record of a run
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a SyncOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
    guidance: Vec<&'a str>,
}

impl<'a> JsonSummary<'a> {
    pub fn new(result: &'a Result<SyncOutcome>, events: &'a [SyncEvent]) -> Self {
        let guidance = events
            .iter()
            .filter_map(|e| match e {
                SyncEvent::Guidance(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();

        match result {
            Ok(outcome) => Self {
                ok: !outcome.needs_attention(),
                outcome: Some(outcome),
                error: None,
                guidance,
            },
            Err(e) => Self {
                ok: false,
                outcome: None,
                error: Some(e.to_report()),
                guidance,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use transync_core::Error;
    use transync_pipeline::StepOutcome;

    #[test]
    fn test_summary_for_new_languages() {
        let result = Ok(SyncOutcome::NewLanguages {
            pulled: StepOutcome::NoChanges,
            files: vec![PathBuf::from("po/eo.po")],
        });
        let events = vec![
            SyncEvent::StepStarted(Step::Pull),
            SyncEvent::Guidance("add the file".to_string()),
        ];

        let json = serde_json::to_value(JsonSummary::new(&result, &events)).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["outcome"]["status"], "new_languages");
        assert_eq!(json["outcome"]["pulled"]["result"], "no_changes");
        assert_eq!(json["outcome"]["files"][0], "po/eo.po");
        assert_eq!(json["guidance"][0], "add the file");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_summary_for_error() {
        let result = Err(Error::dirty_work_tree("you have unstaged changes"));
        let json = serde_json::to_value(JsonSummary::new(&result, &[])).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code_str"], "E4003");
        assert!(json.get("outcome").is_none());
    }
}
