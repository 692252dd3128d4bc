//! transync - translation sync for maintainers
//!
//! Pulls translations, stops on new languages, pushes source strings, and
//! commits what changed.

use clap::{Parser, ValueEnum};
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use transync_core::prelude::{exit_codes, Config, GitRepo, Result};
use transync_pipeline::{
    CommandClient, RecordingReporter, Reporter, SyncOutcome, SyncPipeline, SyncSettings,
};

mod render;

use render::{JsonSummary, TerminalReporter};

/// Sync translations with the translation platform and commit the results
#[derive(Parser)]
#[command(name = "transync")]
#[command(author, version, about)]
#[command(long_about = "Sync translations with the translation platform and commit the results.\n\n\
Runs three steps against a clean working tree:\n  \
1. pull translations and commit them\n  \
2. stop (exit 1) if new language files appeared in the translations directory\n  \
3. push source strings, pull again and commit\n\n\
Exit status is 0 on success or when there was nothing to do, 1 when the run \
stopped or failed, and 2 on invalid usage.")]
struct Cli {
    /// Repository to sync (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Configuration file (defaults to .transync.toml in the repository)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.format {
        OutputFormat::Text => run_text(&cli),
        OutputFormat::Json => run_json(&cli),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("transync=debug,transync_pipeline=debug,transync_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn sync(cli: &Cli, reporter: &mut dyn Reporter) -> Result<SyncOutcome> {
    let repo = match &cli.repo {
        Some(dir) => GitRepo::open(dir)?,
        None => GitRepo::open_current()?,
    };
    let config = Config::load(cli.config.as_deref(), repo.workdir())?;
    debug!(config = ?config.path, "using configuration");

    let mut client = CommandClient::new(&config.schema.platform, repo.workdir());
    if cli.format == OutputFormat::Json {
        client = client.with_stdout_to_stderr();
    }
    let settings = SyncSettings::from_config(&config.schema, repo.workdir());

    SyncPipeline::new(&repo, &client, settings).run(reporter)
}

fn exit_code(outcome: &Result<SyncOutcome>) -> ExitCode {
    let code = match outcome {
        Ok(outcome) if outcome.needs_attention() => exit_codes::FAILURE,
        Ok(_) => exit_codes::SUCCESS,
        Err(_) => exit_codes::FAILURE,
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run_text(cli: &Cli) -> ExitCode {
    let mut reporter = TerminalReporter;
    let result = sync(cli, &mut reporter);

    match &result {
        Ok(outcome) => reporter.finish(outcome),
        Err(e) => eprintln!(
            "{} {}",
            "Error:".if_supports_color(Stream::Stderr, |t| t.red().bold().to_string()),
            e
        ),
    }
    exit_code(&result)
}

fn run_json(cli: &Cli) -> ExitCode {
    let mut reporter = RecordingReporter::default();
    let result = sync(cli, &mut reporter);

    let summary = JsonSummary::new(&result, &reporter.events);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: failed to serialize summary: {e}"),
    }
    exit_code(&result)
}
