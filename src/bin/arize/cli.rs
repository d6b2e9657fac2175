//! command line arguments

use arize::types::{DashboardRef, ModelRef, SpanSort};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command line client for the Arize ML observability platform.
#[derive(Parser, Debug)]
#[command(name = "arize", author, version, about, long_about = None)]
pub struct Cli {
    /// Profile to use (defaults to the stored default profile).
    #[arg(long, global = true, env = "ARIZE_PROFILE")]
    pub profile: Option<String>,

    /// Path to the profiles file.
    #[arg(long, global = true, env = "ARIZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage credential profiles.
    #[command(subcommand)]
    Config(ConfigAction),

    /// Models in the current space.
    #[command(subcommand)]
    Models(ModelsAction),

    /// Dashboards in the current space.
    #[command(subcommand)]
    Dashboards(DashboardsAction),

    /// Monitors of a model.
    #[command(subcommand)]
    Monitors(MonitorsAction),

    /// Spans and traces of a model.
    #[command(subcommand)]
    Traces(TracesAction),

    /// Run a raw GraphQL document.
    Query {
        /// Document text, or @path to read it from a file.
        document: String,

        /// Variables as a JSON object.
        #[arg(long)]
        variables: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create or replace a profile.
    Init {
        /// Profile name.
        #[arg(long, default_value = "default")]
        name: String,

        #[arg(long, env = "ARIZE_API_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long, env = "ARIZE_ORGANIZATION")]
        organization: String,

        #[arg(long, env = "ARIZE_SPACE")]
        space: String,

        /// Alternate API host.
        #[arg(long, env = "ARIZE_BASE_URL")]
        base_url: Option<String>,

        /// Make this the default profile.
        #[arg(long)]
        default: bool,
    },

    /// List stored profiles.
    List,

    /// Show one profile with the api key redacted.
    Show {
        /// Profile name (defaults to the selected profile).
        name: Option<String>,
    },

    /// Set the default profile.
    Use { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List models.
    List(ListArgs),

    /// Show one model.
    Get(ModelArgs),

    /// Delete a model.
    Delete(ModelArgs),
}

#[derive(Subcommand, Debug)]
pub enum DashboardsAction {
    /// List dashboards.
    List(ListArgs),

    /// Show one dashboard.
    Get(DashboardArgs),

    /// Create an empty dashboard.
    Create {
        /// Dashboard name.
        name: String,
    },

    /// Create a dashboard with one volume chart per model.
    CreateVolume {
        /// Dashboard name.
        name: String,

        /// Only these models (comma separated names).
        #[arg(long, value_delimiter = ',')]
        models: Vec<String>,
    },

    /// Delete a dashboard.
    Delete(DashboardArgs),
}

#[derive(Subcommand, Debug)]
pub enum MonitorsAction {
    /// List monitors of a model.
    List {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one monitor.
    Get(MonitorArgs),

    /// Delete a monitor.
    Delete(MonitorArgs),
}

#[derive(Subcommand, Debug)]
pub enum TracesAction {
    /// List spans of a model within a time window.
    List {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        list: ListArgs,

        /// Sort as column:direction, e.g. latencyMs:desc.
        #[arg(long)]
        sort: Option<SpanSort>,

        /// Only spans without a parent.
        #[arg(long)]
        root_only: bool,
    },

    /// Show every span of one trace.
    Get {
        /// Trace id.
        trace_id: String,

        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Model name.
    #[arg(long, conflicts_with = "model_id")]
    pub model_name: Option<String>,

    /// Model id.
    #[arg(long)]
    pub model_id: Option<String>,
}

impl ModelArgs {
    pub fn to_ref(&self) -> arize::Result<ModelRef> {
        ModelRef::from_parts(self.model_id.clone(), self.model_name.clone())
    }
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Dashboard name.
    #[arg(long, conflicts_with = "id")]
    pub name: Option<String>,

    /// Dashboard id.
    #[arg(long)]
    pub id: Option<String>,
}

impl DashboardArgs {
    pub fn to_ref(&self) -> arize::Result<DashboardRef> {
        DashboardRef::from_parts(self.id.clone(), self.name.clone())
    }
}

#[derive(Args, Debug, Clone)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Monitor name (needs the model).
    #[arg(long, conflicts_with = "id")]
    pub name: Option<String>,

    /// Monitor id.
    #[arg(long, required_unless_present = "name")]
    pub id: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Window start (RFC 3339 or YYYY-MM-DD, default 7 days ago).
    #[arg(long, value_parser = parse_time)]
    pub start_time: Option<DateTime<Utc>>,

    /// Window end (RFC 3339 or YYYY-MM-DD, default now).
    #[arg(long, value_parser = parse_time)]
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Maximum number of rows.
    #[arg(long)]
    pub count: Option<usize>,

    /// Fetch every row, ignoring the default row limit.
    #[arg(long, conflicts_with = "count")]
    pub all: bool,

    /// Write rows to this CSV file instead of printing them.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Columns to show (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl ListArgs {
    /// row limit: `--all` lifts it, otherwise `--count` or the default
    pub fn limit(&self, default: Option<usize>) -> Option<usize> {
        if self.all {
            None
        } else {
            self.count.or(default)
        }
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
        .ok_or_else(|| format!("'{value}' is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}
