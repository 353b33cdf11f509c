use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;

#[derive(Parser, Debug)]
#[command(name = "steamshelf")]
#[command(about = "Browse and discover games in your Steam library", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log verbosity (defaults to RUST_LOG, then warn)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the selected command emits JSON, which also changes how
    /// errors are reported.
    pub fn json_output(&self) -> bool {
        match &self.command {
            Commands::Library(args) => args.json,
            Commands::Whoami { json } | Commands::Genres { json } | Commands::Tags { json } => {
                *json
            }
            Commands::Config { .. } => false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse your Steam library
    Library(LibraryArgs),

    /// Configure API key and user
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show the configured Steam user and library statistics
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List store genres
    Genres {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List popular user tags
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set your Steam Web API key
    SetKey { api_key: String },

    /// Set your Steam username (vanity name) or 64-bit ID
    SetUser { username: String },

    /// Show current configuration
    Show,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LibraryArgs {
    /// Limit number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show only unplayed games
    #[arg(long)]
    pub unplayed: bool,

    /// Minimum playtime in hours
    #[arg(long, value_name = "HOURS")]
    pub min_hours: Option<f64>,

    /// Maximum playtime in hours
    #[arg(long, value_name = "HOURS")]
    pub max_hours: Option<f64>,

    /// Show only games played on Steam Deck
    #[arg(long)]
    pub deck: bool,

    /// Show Steam Deck playtime in output
    #[arg(long)]
    pub deck_hours: bool,

    /// Filter by Deck compatibility: verified, playable, unsupported, unknown, ok, any
    #[arg(long, value_name = "STATUS")]
    pub deck_compat: Option<String>,

    /// Show Deck compatibility in output
    #[arg(long)]
    pub show_compat: bool,

    /// Sort by: name, playtime, deck, reviews, compat
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Plain list output (no table)
    #[arg(long)]
    pub plain: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Filter by review category (e.g. very-positive, mixed, positive+)
    #[arg(long, value_name = "CATEGORY")]
    pub reviews: Option<String>,

    /// Minimum review score (1-9)
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub min_reviews: Option<i64>,

    /// Maximum review score (1-9)
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub max_reviews: Option<i64>,

    /// Show review scores in output
    #[arg(long)]
    pub show_reviews: bool,

    /// Filter by genre (partial match)
    #[arg(long)]
    pub genre: Option<String>,

    /// Filter by tag (partial match)
    #[arg(long)]
    pub tag: Option<String>,

    /// Show tags in output
    #[arg(long)]
    pub show_tags: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
