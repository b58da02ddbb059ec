//! `meeting-guard` CLI: check a proposed meeting for conflicts and validate
//! meeting fields from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Conflict check (stdin -> stdout), server policy by default
//! meeting-guard check < request.json
//!
//! # Client policy, 15-minute adjacency buffer, Berlin time in messages
//! meeting-guard check -i request.json --preset client --buffer-minutes 15 \
//!     --timezone Europe/Berlin
//!
//! # Exit with status 2 when the proposal has blocking conflicts
//! meeting-guard check -i request.json --fail-on-conflict
//!
//! # Validate meeting fields against a fixed "now"
//! meeting-guard validate -i draft.json --now 2026-03-01T00:00:00Z
//!
//! # Thresholds and policy from a config file
//! meeting-guard --config guard.json check -i request.json
//! ```
//!
//! Logs go to stderr. `RUST_LOG` controls the filter (default `warn`);
//! `--verbose` switches to `debug`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use meeting_guard::policy::parse_timezone;
use meeting_guard::wire::{self, ConflictResponse};
use meeting_guard::{GuardConfig, PolicyPreset};
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit status when `--fail-on-conflict` / `--fail-on-invalid` trips.
const EXIT_BLOCKED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "meeting-guard",
    version,
    about = "Meeting conflict detection and validation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file with `scan` and `validation` sections
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log classification decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a proposed meeting against existing meetings
    Check {
        /// Request file `{ "proposed": ..., "candidates": [...] }` (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Policy preset: "client" or "server"
        #[arg(long)]
        preset: Option<PolicyPreset>,
        /// Adjacency buffer in minutes (0 disables adjacency warnings)
        #[arg(long)]
        buffer_minutes: Option<i64>,
        /// IANA timezone for time ranges in messages
        #[arg(long)]
        timezone: Option<String>,
        /// Exit with status 2 when blocking conflicts are found
        #[arg(long)]
        fail_on_conflict: bool,
    },
    /// Validate meeting fields
    Validate {
        /// Draft file `{ "title", "description", "startTime", "endTime" }` (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Current time as RFC 3339 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
        /// IANA timezone deciding weekends and business hours
        #[arg(long)]
        timezone: Option<String>,
        /// Exit with status 2 when validation errors are found
        #[arg(long)]
        fail_on_invalid: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            input,
            output,
            preset,
            buffer_minutes,
            timezone,
            fail_on_conflict,
        } => {
            if let Some(preset) = preset {
                let display_timezone = config.scan.display_timezone;
                config.scan = preset.policy().with_display_timezone(display_timezone);
            }
            if let Some(minutes) = buffer_minutes {
                config.scan = config
                    .scan
                    .with_buffer_minutes(minutes)
                    .context("Invalid --buffer-minutes value")?;
            }
            if let Some(name) = timezone.as_deref() {
                config.scan = config.scan.with_display_timezone(parse_timezone(name)?);
            }

            let json = read_input(input.as_deref())?;
            let (proposed, candidates) =
                wire::parse_check_request(&json).context("Failed to parse check request")?;
            let report = meeting_guard::scan(&proposed, &candidates, &config.scan);
            tracing::info!(
                candidates = candidates.len(),
                conflicts = report.conflicts.len(),
                warnings = report.warnings.len(),
                "check_completed"
            );

            let response = ConflictResponse::from(&report);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&response)?)?;

            if fail_on_conflict && response.has_conflicts {
                process::exit(EXIT_BLOCKED);
            }
        }
        Commands::Validate {
            input,
            output,
            now,
            timezone,
            fail_on_invalid,
        } => {
            if let Some(name) = timezone.as_deref() {
                config.validation.reference_timezone = parse_timezone(name)?;
            }
            let now = resolve_now(now.as_deref())?;

            let json = read_input(input.as_deref())?;
            let draft = wire::parse_draft(&json).context("Failed to parse meeting draft")?;
            let result = meeting_guard::validate_with(&draft, now, &config.validation);
            tracing::info!(
                valid = result.is_valid,
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "validate_completed"
            );

            write_output(output.as_deref(), &serde_json::to_string_pretty(&result)?)?;

            if fail_on_invalid && !result.is_valid {
                process::exit(EXIT_BLOCKED);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<GuardConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            GuardConfig::from_json_str(&json)
                .with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(GuardConfig::default()),
    }
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => wire::parse_timestamp(raw).context("Invalid --now value"),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
