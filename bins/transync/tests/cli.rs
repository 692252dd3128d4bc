use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use transync_core::error::exit_codes;

fn transync() -> Command {
    Command::cargo_bin("transync").unwrap()
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A repository with one committed translation, plus a separate directory for
/// config files and markers so they never touch the working tree.
struct Fixture {
    repo: TempDir,
    aux: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let repo = tempfile::tempdir().unwrap();
        let dir = repo.path();
        git(dir, &["init", "--quiet"]);
        git(dir, &["config", "user.name", "Sync Test"]);
        git(dir, &["config", "user.email", "sync@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        fs::create_dir(dir.join("po")).unwrap();
        fs::write(dir.join("po/de.po"), "msgid \"hello\"\nmsgstr \"hallo\"\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "--quiet", "-m", "initial"]);

        Self {
            repo,
            aux: tempfile::tempdir().unwrap(),
        }
    }

    /// Write a config whose translation client is `sh -c <script>`
    fn config(&self, pull: &str, push: &str) -> std::path::PathBuf {
        let path = self.aux.path().join("transync.toml");
        let content = format!(
            "[platform]\nprogram = \"sh\"\npull_args = [\"-c\", {pull:?}]\npush_args = [\"-c\", {push:?}]\n"
        );
        fs::write(&path, content).unwrap();
        path
    }

    fn commit_subjects(&self) -> Vec<String> {
        git(self.repo.path(), &["log", "--format=%s"])
            .lines()
            .map(String::from)
            .collect()
    }

    fn run(&self, config: &Path) -> assert_cmd::assert::Assert {
        transync()
            .arg("--repo")
            .arg(self.repo.path())
            .arg("--config")
            .arg(config)
            .assert()
    }
}

#[test]
fn help_exits_zero_outside_a_repository() {
    let dir = tempfile::tempdir().unwrap();
    transync()
        .current_dir(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("new language"));
}

#[test]
fn unknown_flag_is_usage_error() {
    transync()
        .arg("--frobnicate")
        .assert()
        .code(exit_codes::USAGE)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn stray_argument_is_usage_error() {
    transync().arg("now").assert().code(exit_codes::USAGE);
}

#[test]
fn outside_a_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    transync()
        .arg("--repo")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn dirty_tree_fails_without_running_the_client() {
    let fixture = Fixture::new();
    let marker = fixture.aux.path().join("pulled");
    let config = fixture.config(&format!("touch {}", marker.display()), "true");
    fs::write(fixture.repo.path().join("po/de.po"), "local edit\n").unwrap();

    fixture
        .run(&config)
        .code(1)
        .stderr(predicate::str::contains("unstaged changes"));

    assert!(!marker.exists());
    assert_eq!(fixture.commit_subjects(), vec!["initial"]);
}

#[test]
fn nothing_to_sync() {
    let fixture = Fixture::new();
    let config = fixture.config("true", "true");

    fixture
        .run(&config)
        .success()
        .stdout(predicate::str::contains("Committing pulled translations... none."))
        .stdout(predicate::str::contains("Committing refreshed translations... none."));

    assert_eq!(fixture.commit_subjects(), vec!["initial"]);
}

#[test]
fn pull_and_refresh_each_commit_once() {
    let fixture = Fixture::new();
    let config = fixture.config("echo '#, fuzzy' >> po/de.po", "true");

    fixture
        .run(&config)
        .success()
        .stdout(predicate::str::contains("po/de.po"))
        .stdout(predicate::str::contains("2 commits"));

    assert_eq!(
        fixture.commit_subjects(),
        vec![
            "Refresh translations after pushing source strings",
            "Update translations from translation platform",
            "initial",
        ]
    );
}

#[test]
fn new_language_stops_before_push() {
    let fixture = Fixture::new();
    let pushed = fixture.aux.path().join("pushed");
    let config = fixture.config(
        "echo 'msgid \"\"' > po/eo.po",
        &format!("touch {}", pushed.display()),
    );

    fixture
        .run(&config)
        .code(1)
        .stderr(predicate::str::contains("po/eo.po"));

    assert!(!pushed.exists());
    assert_eq!(fixture.commit_subjects(), vec!["initial"]);
}

#[test]
fn failing_client_fails_the_run() {
    let fixture = Fixture::new();
    let config = fixture.config("exit 3", "true");

    fixture
        .run(&config)
        .code(1)
        .stderr(predicate::str::contains("exited with status 3"));
}

#[test]
fn json_summary() {
    let fixture = Fixture::new();
    let config = fixture.config("echo pulling; echo '#, fuzzy' >> po/de.po", "echo pushing");

    let assert = transync()
        .arg("--repo")
        .arg(fixture.repo.path())
        .arg("--config")
        .arg(&config)
        .args(["--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["outcome"]["status"], "completed");
    assert_eq!(json["outcome"]["pulled"]["result"], "committed");
    assert_eq!(json["outcome"]["pulled"]["stats"]["files_changed"], 1);
}
