//! Command-line interface definition using clap.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};

use culture_core::{DEFAULT_LATENCY_MS, LATENCY_MS_ENV, STATE_DIR_ENV};
use culture_models::{EventCategory, EventPatch, EventStatus, NewEvent};

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.1.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Culture - manage concerts, opera, theater and exhibitions
#[derive(Parser, Debug)]
#[command(name = "culture")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV)]
    pub state_dir: Option<PathBuf>,

    /// Simulated latency of every repository call, in milliseconds
    #[arg(long, env = LATENCY_MS_ENV, default_value_t = DEFAULT_LATENCY_MS)]
    pub latency_ms: u64,

    /// Keep events in memory only; nothing is read from or written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Start from an empty catalogue when nothing is stored yet
    #[arg(long)]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List events matching the given filters
    List {
        /// Only show events with this status
        #[arg(long)]
        status: Option<EventStatus>,

        /// Only show events in this category
        #[arg(short, long)]
        category: Option<EventCategory>,

        /// Case-insensitive text matched against title, description and venue
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show full details of an event
    Show {
        /// Event ID
        #[arg(required = true)]
        id: String,
    },

    /// Create a new event
    Create(CreateArgs),

    /// Change fields of an existing event
    Update {
        /// Event ID
        #[arg(required = true)]
        id: String,

        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Delete an event
    Delete {
        /// Event ID
        #[arg(required = true)]
        id: String,
    },

    /// Publish a draft or unpublish a published event
    Toggle {
        /// Event ID
        #[arg(required = true)]
        id: String,
    },

    /// Print a live countdown to an event's start
    Countdown {
        /// Event ID
        #[arg(required = true)]
        id: String,

        /// Number of one-second ticks to print
        #[arg(short, long, default_value_t = 10)]
        ticks: u32,
    },

    /// Star or unstar an event, then show the list
    Favorite {
        /// Event ID
        #[arg(required = true)]
        id: String,
    },

    /// Render the page for a route such as /events/<id>/edit
    Open {
        /// Route path
        #[arg(default_value = "/")]
        path: String,
    },
}

/// Fields of the creation form.
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub category: EventCategory,

    #[arg(long, default_value = "draft")]
    pub status: EventStatus,

    #[arg(long)]
    pub venue: String,

    /// RFC 3339 timestamp or YYYY-MM-DDTHH:MM (UTC)
    #[arg(long, value_parser = parse_date)]
    pub date: DateTime<Utc>,

    /// Ticket price in euros
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,

    #[arg(long, default_value_t = 0)]
    pub seats: u32,

    /// Image URL; a placeholder is used when omitted
    #[arg(long)]
    pub image_url: Option<String>,
}

impl CreateArgs {
    pub fn into_draft(self) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description,
            status: self.status,
            category: self.category,
            venue: self.venue,
            date: self.date,
            ticket_price: self.price,
            available_seats: self.seats,
            image_url: self.image_url,
        }
    }
}

/// Fields of the edit form; anything omitted is left unchanged.
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<EventCategory>,

    #[arg(long)]
    pub status: Option<EventStatus>,

    #[arg(long)]
    pub venue: Option<String>,

    #[arg(long, value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub seats: Option<u32>,

    #[arg(long)]
    pub image_url: Option<String>,
}

impl UpdateArgs {
    pub fn into_patch(self) -> EventPatch {
        EventPatch {
            title: self.title,
            description: self.description,
            status: self.status,
            category: self.category,
            venue: self.venue,
            date: self.date,
            ticket_price: self.price,
            available_seats: self.seats,
            image_url: self.image_url,
        }
    }
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

/// Parses an RFC 3339 timestamp, or a form-style `YYYY-MM-DDTHH:MM` taken as UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date '{}': expected RFC 3339 or YYYY-MM-DDTHH:MM", value))
}

/// Loads `<state_dir>/config/.env.local` if present. Variables already set win.
///
/// Returns true if a file was read.
pub fn load_state_env(state_dir: &Path) -> bool {
    let path = culture_core::env_file_in(state_dir);
    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded env file");
            true
        }
        Err(_) => false,
    }
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(culture_core::state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
