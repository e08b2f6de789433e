// crates/films-contract-cli/src/main.rs
// ============================================================================
// Module: Films Contract CLI Entry Point
// Description: Command dispatcher for listing and running films contract checks.
// Purpose: Run the contract from a terminal or CI job and report via exit code.
// Dependencies: clap, films-contract, serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! `films-contract list` prints the check catalog. `films-contract run` loads
//! configuration (file, then environment, then flags), runs the selected
//! checks, prints the report, and optionally writes report artifacts.
//! Exit codes: `0` success, `1` failing checks, `2` configuration or usage
//! errors.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use films_contract::CheckGroup;
use films_contract::CheckId;
use films_contract::ContractConfig;
use films_contract::ContractVerifier;
use films_contract::EventSink;
use films_contract::FileEventSink;
use films_contract::NoopEventSink;
use films_contract::RunReport;
use films_contract::Selection;
use films_contract::StderrEventSink;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "films-contract", version, about = "Behavioral contract checks for the films API")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every contract check.
    List(ListCommand),
    /// Run contract checks against a service.
    Run(RunCommand),
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Configuration file (TOML). Falls back to `FILMS_CONTRACT_CONFIG`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Service root, e.g. `https://swapi.dev/api/`.
    #[arg(long = "service-root", value_name = "URL")]
    service_root: Option<String>,
    /// Run only this check (repeatable).
    #[arg(long = "check", value_name = "ID")]
    checks: Vec<String>,
    /// Run every check in this group (repeatable).
    #[arg(long = "group", value_name = "NAME")]
    groups: Vec<String>,
    /// Number of checks to run at once.
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
    /// Fail the run when advisory checks fail.
    #[arg(long)]
    strict: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Directory for `report.json` and `report.md`.
    #[arg(long = "report-dir", value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Event destination: `stderr`, `none`, or a file path.
    #[arg(long, value_name = "stderr|none|FILE", default_value = "none")]
    events: EventsTarget,
}

/// Output formats for structured CLI commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Canonical JSON output.
    Json,
}

/// Destination for verifier events.
#[derive(Clone, Debug, PartialEq, Eq)]
enum EventsTarget {
    /// JSON lines on stderr.
    Stderr,
    /// No events.
    None,
    /// JSON lines appended to a file.
    File(PathBuf),
}

impl std::str::FromStr for EventsTarget {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err("events target must not be empty".to_string()),
            "stderr" => Ok(Self::Stderr),
            "none" => Ok(Self::None),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

/// Catalog entry printed by `list --format json`.
#[derive(Debug, Serialize)]
struct CatalogEntry {
    /// Check identifier.
    id: CheckId,
    /// Check group.
    group: CheckGroup,
    /// Whether the check is advisory.
    advisory: bool,
    /// One-line description.
    description: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Exit code for configuration and usage errors.
const EXIT_USAGE: u8 = 2;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    exit_code(run())
}

/// Maps a command result onto the process exit code.
fn exit_code(result: CliResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::List(command) => command_list(&command),
        Commands::Run(command) => command_run(&command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Prints the check catalog.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    let catalog = CheckId::catalog();
    match command.format {
        OutputFormat::Text => {
            for id in catalog {
                let advisory = if id.is_advisory() { " (advisory)" } else { "" };
                let line = format!(
                    "{:<28} {:<11} {}{advisory}",
                    id.to_string(),
                    id.group().as_str(),
                    id.description()
                );
                write_stdout_line(line.trim_end()).map_err(|err| output_error(&err))?;
            }
        }
        OutputFormat::Json => {
            let entries: Vec<CatalogEntry> = catalog
                .into_iter()
                .map(|id| CatalogEntry {
                    id,
                    group: id.group(),
                    advisory: id.is_advisory(),
                    description: id.description(),
                })
                .collect();
            let bytes = serde_jcs::to_vec(&entries)
                .map_err(|err| CliError::new(format!("failed to encode catalog: {err}")))?;
            write_stdout_bytes_line(&bytes).map_err(|err| output_error(&err))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs the selected checks and reports the outcome.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = resolve_config(command)?;
    let selection = resolve_selection(&command.checks, &command.groups)?;
    let sink = open_event_sink(&command.events)?;
    let verifier = ContractVerifier::new(config)
        .map_err(|err| CliError::new(err.to_string()))?
        .with_event_sink(sink);
    let report = verifier.run(&selection);
    if let Some(dir) = &command.report_dir {
        write_report_artifacts(&report, dir)?;
    }
    print_report(&report, command.format)?;
    Ok(if report.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Resolution Helpers
// ============================================================================

/// Loads file and env configuration, then applies command-line overrides.
fn resolve_config(command: &RunCommand) -> CliResult<ContractConfig> {
    let mut config = ContractConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    apply_overrides(&mut config, command);
    config.validate().map_err(|err| CliError::new(err.to_string()))?;
    Ok(config)
}

/// Applies command-line flags on top of loaded configuration.
fn apply_overrides(config: &mut ContractConfig, command: &RunCommand) {
    if let Some(root) = &command.service_root {
        config.service_root.clone_from(root);
    }
    if let Some(jobs) = command.jobs {
        config.max_parallel = jobs;
    }
    if command.strict {
        config.strict = true;
    }
}

/// Parses `--check` and `--group` values into a selection.
fn resolve_selection(checks: &[String], groups: &[String]) -> CliResult<Selection> {
    let checks = checks
        .iter()
        .map(|value| value.parse::<CheckId>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CliError::new(err.to_string()))?;
    let groups = groups
        .iter()
        .map(|value| value.parse::<CheckGroup>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CliError::new(err.to_string()))?;
    Ok(Selection {
        checks,
        groups,
    })
}

/// Opens the event sink named by `--events`.
fn open_event_sink(target: &EventsTarget) -> CliResult<Arc<dyn EventSink>> {
    match target {
        EventsTarget::Stderr => Ok(Arc::new(StderrEventSink)),
        EventsTarget::None => Ok(Arc::new(NoopEventSink)),
        EventsTarget::File(path) => {
            let sink = FileEventSink::new(path).map_err(|err| {
                CliError::new(format!("failed to open event log {}: {err}", path.display()))
            })?;
            Ok(Arc::new(sink))
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes report artifacts and notes their paths on stderr.
fn write_report_artifacts(report: &RunReport, dir: &Path) -> CliResult<()> {
    let written = report.write_artifacts(dir).map_err(|err| {
        CliError::new(format!("failed to write report to {}: {err}", dir.display()))
    })?;
    for path in written {
        write_stderr_line(&format!("wrote {}", path.display())).map_err(|err| output_error(&err))?;
    }
    Ok(())
}

/// Prints the report in the requested format.
fn print_report(report: &RunReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Text => {
            write_stdout_line(report.to_text().trim_end()).map_err(|err| output_error(&err))
        }
        OutputFormat::Json => {
            let bytes = report
                .to_canonical_json()
                .map_err(|err| CliError::new(format!("failed to encode report: {err}")))?;
            write_stdout_bytes_line(&bytes).map_err(|err| output_error(&err))
        }
    }
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout with a trailing newline.
fn write_stdout_bytes_line(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)?;
    stdout.write_all(b"\n")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output failure.
fn output_error(error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write output: {error}"))
}

/// Emits an error message and returns the usage exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_USAGE)
}
