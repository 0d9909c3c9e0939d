//! CLI entry point for taskdeck.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use taskdeck_app::{AppConfig, TaskService};
use taskdeck_store_json::JsonStore;

mod commands;

/// Personal tasks tracked in a flat JSON file.
#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about = "taskdeck: personal tasks tracked in a flat JSON file"
)]
struct Cli {
    /// Path to the backing file (overrides configuration).
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new task.
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        desc: String,
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },

    /// Show a single task as JSON.
    Show { id: String },

    /// Mark a task as in progress.
    Start { id: String },

    /// Mark a task as done.
    Finish { id: String },

    /// Delete a task.
    Delete { id: String },

    /// Update title and/or description of a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
    },

    /// List tasks with optional filtering, searching, and sorting.
    Ls {
        /// Filter by status: todo, in_progress, or done.
        #[arg(long)]
        status: Option<String>,
        /// Filter by a tag.
        #[arg(long)]
        tag: Option<String>,
        /// Sort ascending by created_at, started_at, or finished_at.
        #[arg(long)]
        sort: Option<String>,
        /// Keep tasks whose title or description contains this text.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },
}

/// Output format for the `ls` subcommand.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LsFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON records.
    Json,
}

fn main() -> Result<()> {
    install_tracing();

    let Cli { file, cmd } = Cli::parse();
    let config = AppConfig::load(".")?;
    let path = file.unwrap_or_else(|| config.store_path("."));
    let service = TaskService::new(JsonStore::new(path));
    commands::run(cmd, &service)
}

fn install_tracing() {
    // RUST_LOG can override the default INFO level.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
