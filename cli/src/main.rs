//! Hostscope CLI - Inspect open ports and running processes
//!
//! A command-line tool for listing listening sockets and processes,
//! and killing processes in batches.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use commands::list::ProcessFilter;

#[derive(Parser)]
#[command(name = "hostscope")]
#[command(author, version, about = "Inspect open ports and processes, and kill them")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Minimum log level written to stderr, warn when unset (RUST_LOG overrides)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<Level>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    /// Human-readable text format.
    Text,
    /// Machine-readable JSON format.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List listening and connected ports
    #[command(alias = "ls")]
    Ports {
        /// Only this port number
        port: Option<String>,
    },

    /// List running processes
    #[command(alias = "ps")]
    Procs {
        /// Process name or PID
        target: Option<String>,

        /// Only processes owned by this user
        #[arg(short, long, conflicts_with_all = ["target", "high_cpu", "high_mem"])]
        user: Option<String>,

        /// Only processes at or above this CPU percentage
        #[arg(
            long,
            value_name = "PERCENT",
            num_args = 0..=1,
            default_missing_value = "10",
            conflicts_with_all = ["target", "high_mem"]
        )]
        high_cpu: Option<f64>,

        /// Only processes using 100 MB or more
        #[arg(long, conflicts_with = "target")]
        high_mem: bool,
    },

    /// Kill processes by PID
    Kill {
        /// Kill as port owners (no protected PID range)
        #[arg(long)]
        ports: bool,

        /// Process IDs to kill, in order
        #[arg(required = true)]
        pids: Vec<String>,
    },

    /// Show table column metadata
    Columns {
        #[arg(value_enum)]
        kind: RecordKind,
    },

    /// Show platform, command templates and readiness
    Info,

    /// Show current configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RecordKind {
    Ports,
    Procs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG directives when set, otherwise `level` (default warn).
fn build_filter(rust_log: Option<&str>, level: Option<Level>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid RUST_LOG: {}", e),
        }
    }
    EnvFilter::default().add_directive(level.unwrap_or(Level::WARN).into())
}

fn init_logging(level: Option<Level>, format: LogFormat) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), level);

    match format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Ports { port } => commands::list::ports(port.as_deref(), cli.json),
        Commands::Procs {
            target,
            user,
            high_cpu,
            high_mem,
        } => {
            let filter = match (user, high_cpu, high_mem) {
                (Some(user), _, _) => ProcessFilter::User(user),
                (None, Some(threshold), _) => ProcessFilter::HighCpu(threshold),
                (None, None, true) => ProcessFilter::HighMemory,
                (None, None, false) => ProcessFilter::Query(target.unwrap_or_default()),
            };
            commands::list::processes(filter, cli.json)
        }
        Commands::Kill { ports, pids } => commands::kill::run(&pids, ports, cli.json),
        Commands::Columns { kind } => commands::list::columns(kind == RecordKind::Ports, cli.json),
        Commands::Info => commands::info::show(cli.json),
        Commands::Config => commands::info::config(cli.json),
    }
}
