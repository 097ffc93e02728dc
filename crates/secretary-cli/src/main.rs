//! `secretary` CLI — compute availability and meeting proposals from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Available intervals of a window, given busy time from a file
//! secretary free --start 2026-03-17T09:00:00 --end 2026-03-17T12:00:00 --busy busy.json
//!
//! # Three 30-minute proposals on a 15-minute grid (busy time from stdin)
//! cat busy.json | secretary propose --start 2026-03-17T09:00:00+03:00 \
//!     --end 2026-03-17T12:00:00+03:00 --busy - --duration 30
//!
//! # Full intent flow with the offline extractor
//! secretary intent --text "45 min with alice@example.com" --busy busy.json
//!
//! # Book a meeting, send the recap mail (dry run)
//! secretary book --title "Sync" --attendees a@example.com \
//!     --start 2026-03-17T09:00:00 --end 2026-03-17T09:30:00
//! secretary followup --hours 4
//! ```
//!
//! Busy files are JSON arrays of `{"start": "...", "end": "..."}` objects.
//! Timestamps without an offset are read in the configured default timezone.

use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use secretary::{
    DryRunMailer, EventCreate, InMemoryActivityLog, InMemoryCalendar, IntentRequest,
    RegexExtractor, Secretary, SecretaryConfig,
};
use serde::{Deserialize, Serialize};
use slot_engine::{Interval, PickOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "secretary",
    version,
    about = "Meeting slot proposals from free/busy data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults are used if omitted)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the configured default timezone (IANA name)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the available intervals of a window
    Free {
        /// Window start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Window end (ISO 8601)
        #[arg(long)]
        end: String,
        /// Busy intervals JSON file, or "-" for stdin
        #[arg(short, long)]
        busy: Option<String>,
    },
    /// Print proposed meeting start times
    Propose {
        /// Window start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Window end (ISO 8601)
        #[arg(long)]
        end: String,
        /// Busy intervals JSON file, or "-" for stdin
        #[arg(short, long)]
        busy: Option<String>,
        /// Meeting length in minutes
        #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
        duration: i64,
        /// Maximum number of proposals (configured value if omitted)
        #[arg(long)]
        limit: Option<usize>,
        /// Minutes between candidates (configured value if omitted)
        #[arg(long, allow_negative_numbers = true)]
        stride: Option<i64>,
    },
    /// Run the full intent flow on free text using the offline extractor
    Intent {
        /// The meeting request text
        #[arg(short, long)]
        text: String,
        /// Busy intervals JSON file, or "-" for stdin
        #[arg(short, long)]
        busy: Option<String>,
        /// API key (the configured key if omitted)
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        stride: Option<i64>,
    },
    /// Book a meeting on the in-memory calendar
    Book {
        #[arg(long)]
        title: String,
        /// Comma-separated attendee emails
        #[arg(long, default_value = "")]
        attendees: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// Send the post-meeting recap (dry run)
    Followup {
        #[arg(long, default_value_t = 4)]
        hours: u32,
    },
}

/// One busy interval as written in a busy file.
#[derive(Debug, Deserialize, Serialize)]
struct BusyRecord {
    start: String,
    end: String,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    enable_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(tz) = cli.timezone {
        config.default_timezone = tz;
    }
    let tz = config.timezone().context("Invalid timezone")?;

    let rendered = match cli.command {
        Commands::Free { start, end, busy } => {
            let window = parse_window(&start, &end, tz)?;
            let busy = read_busy(busy.as_deref(), tz)?;
            let available =
                slot_engine::normalize(&window, &busy).context("Failed to compute availability")?;
            serde_json::to_string_pretty(&available)?
        }
        Commands::Propose {
            start,
            end,
            busy,
            duration,
            limit,
            stride,
        } => {
            let window = parse_window(&start, &end, tz)?;
            let busy = read_busy(busy.as_deref(), tz)?;
            let options = pick_options(&config, limit, stride);
            let duration =
                Duration::try_minutes(duration).context("Duration is out of range")?;
            let slots = slot_engine::propose(&window, &busy, duration, &options)
                .context("Failed to propose slots")?;
            serde_json::to_string_pretty(&slots)?
        }
        Commands::Intent {
            text,
            busy,
            api_key,
            limit,
            stride,
        } => {
            let busy = read_busy(busy.as_deref(), tz)?;
            let secretary = build_secretary(&config, busy)?;
            let key = api_key.unwrap_or_else(|| config.api_key.clone());
            let request = IntentRequest {
                limit,
                stride_minutes: stride,
                ..IntentRequest::new(text)
            };
            let response = secretary
                .parse_intent(Some(&key), &request)
                .context("Failed to handle intent")?;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Book {
            title,
            attendees,
            start,
            end,
            location,
        } => {
            let secretary = build_secretary(&config, Vec::new())?;
            let request = EventCreate {
                title,
                attendees: split_list(&attendees),
                start: slot_engine::localize_instant(&start, tz)?,
                end: slot_engine::localize_instant(&end, tz)?,
                location,
                tags: Vec::new(),
            };
            let created = secretary
                .create_event(Some(&config.api_key), &request)
                .context("Failed to create event")?;
            serde_json::to_string_pretty(&created)?
        }
        Commands::Followup { hours } => {
            let secretary = build_secretary(&config, Vec::new())?;
            let report = secretary
                .run_followups(Some(&config.api_key), hours)
                .context("Failed to run follow-ups")?;
            serde_json::to_string_pretty(&report)?
        }
    };

    write_output(cli.output.as_deref(), &rendered)
}

fn load_config(path: Option<&str>) -> Result<SecretaryConfig> {
    let config = match path {
        Some(path) => SecretaryConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => SecretaryConfig::default(),
    };
    config
        .with_process_env()
        .context("Invalid environment configuration")
}

fn build_secretary(config: &SecretaryConfig, busy: Vec<Interval>) -> Result<Secretary> {
    let calendar = InMemoryCalendar::new().with_busy(config.calendar_id.clone(), busy);
    Secretary::new(
        config.clone(),
        Arc::new(RegexExtractor::new()),
        Arc::new(calendar),
        Arc::new(DryRunMailer::new()),
        Arc::new(InMemoryActivityLog::new()),
    )
    .context("Failed to start secretary")
}

fn pick_options(config: &SecretaryConfig, limit: Option<usize>, stride: Option<i64>) -> PickOptions {
    let mut options = config.pick_options();
    if let Some(limit) = limit {
        options = options.with_limit(limit);
    }
    if let Some(stride) = stride {
        options = options.with_stride_minutes(stride);
    }
    options
}

fn parse_window(start: &str, end: &str, tz: Tz) -> Result<Interval> {
    let start = slot_engine::localize_instant(start, tz).context("Invalid window start")?;
    let end = slot_engine::localize_instant(end, tz).context("Invalid window end")?;
    Ok(Interval::window(start, end)?)
}

/// Read busy intervals from a file or stdin; no source means no busy time.
///
/// Intervals are not validated here so the engine can report the offending index.
fn read_busy(source: Option<&str>, tz: Tz) -> Result<Vec<Interval>> {
    let Some(source) = source else {
        return Ok(Vec::new());
    };
    let raw = read_input(source)?;
    let records: Vec<BusyRecord> =
        serde_json::from_str(&raw).context("Failed to parse busy intervals JSON")?;
    debug!(count = records.len(), "read busy intervals");
    records
        .iter()
        .enumerate()
        .map(|(i, r)| -> Result<Interval> {
            Ok(Interval {
                start: slot_engine::localize_instant(&r.start, tz)
                    .with_context(|| format!("busy[{}].start", i))?,
                end: slot_engine::localize_instant(&r.end, tz)
                    .with_context(|| format!("busy[{}].end", i))?,
            })
        })
        .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_input(source: &str) -> Result<String> {
    match source {
        "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
        path => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path)),
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
