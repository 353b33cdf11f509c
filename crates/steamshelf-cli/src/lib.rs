//! steamshelf command-line interface
//!
//! Argument parsing, command dispatch, terminal rendering and the mapping
//! from failures to exit codes.

pub mod args;
pub mod commands;
pub mod display;
pub mod progress;

pub use args::{Cli, Commands, ConfigCommand, LibraryArgs, LogLevel};

use anyhow::Result;
use display::Painter;
use is_terminal::IsTerminal;
use owo_colors::Style;
use std::ffi::OsStr;
use steamshelf_config::ConfigError;
use steamshelf_library::FilterError;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
/// Also used for malformed command lines
pub const EXIT_FILTER: i32 = 3;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Library(args) => commands::library::run(&args).await,
        Commands::Config { command } => commands::config::run(&command).await,
        Commands::Whoami { json } => commands::whoami::run(json).await,
        Commands::Genres { json } => commands::catalog::genres(json).await,
        Commands::Tags { json } => commands::catalog::tags(json).await,
    }
}

/// Exit status for a fatal error
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<ConfigError>()) {
        EXIT_CONFIG
    } else if err.chain().any(|cause| cause.is::<FilterError>()) {
        EXIT_FILTER
    } else {
        EXIT_FAILURE
    }
}

fn json_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// The single JSON error payload written to stderr in JSON mode
pub fn error_payload(err: &anyhow::Error) -> String {
    json_error(&format!("{:#}", err))
}

pub fn report_error(err: &anyhow::Error, json: bool) {
    if json {
        eprintln!("{}", error_payload(err));
    } else {
        let painter = Painter::stderr();
        eprintln!("{} {:#}", painter.paint("Error:", Style::new().red()), err);
    }
}

/// Whether a raw command line asked for JSON output. Used when parsing
/// failed and no [`Cli`] exists to ask.
pub fn argv_requests_json<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .take_while(|arg| arg.as_ref() != OsStr::new("--"))
        .any(|arg| arg.as_ref() == OsStr::new("--json"))
}

/// Report a command-line parsing failure and return the exit status.
/// Help and version requests print to stdout and succeed.
pub fn report_usage_error(err: &clap::Error, json: bool) -> i32 {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            if json {
                eprintln!("{}", usage_payload(err));
            } else {
                let _ = err.print();
            }
            EXIT_FILTER
        }
    }
}

fn usage_payload(err: &clap::Error) -> String {
    json_error(err.render().to_string().trim())
}

/// Install the stderr log subscriber. `--log-level` wins over `RUST_LOG`.
pub fn setup_logging(level: Option<LogLevel>) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}
