use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Plan orchestration for AI agents
///
/// Trellis keeps one active plan per session: a goal broken into
/// prioritized tasks with dependencies. Agents drive it through the MCP
/// server; the `run` command replays a JSON script of the same operations
/// for inspection and testing.
#[derive(Parser)]
#[command(version, about, name = "trellis")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Task cap applied when create_plan omits max_tasks
    #[arg(long, global = true, value_name = "N")]
    pub default_max_tasks: Option<usize>,

    /// Upper bound that requested max_tasks values are clamped to
    #[arg(long, global = true, value_name = "N")]
    pub max_tasks_ceiling: Option<usize>,

    /// Upper bound that requested max_actions values are clamped to
    #[arg(long, global = true, value_name = "N")]
    pub max_actions_ceiling: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server on stdio
    Serve,
    /// Replay a JSON script of plan operations
    #[command(alias = "r")]
    Run(RunArgs),
}

/// Replay a script of operations against a fresh store
///
/// The script is a JSON array of calls, each tagged with its operation:
/// `[{"op": "create_plan", "goal": "ship docs"}, {"op": "next_actions"}]`.
/// Every call may name a `session`; calls without one use the default
/// session.
#[derive(ClapArgs)]
pub struct RunArgs {
    #[arg(help = "Path to the script file, or '-' to read from stdin")]
    pub file: PathBuf,
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = OutputFormat::Markdown,
        help = "Output format for the resulting envelopes"
    )]
    pub format: OutputFormat,
}

/// How replayed envelopes are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A single JSON array of envelopes
    Json,
    /// Rendered markdown, one section per call
    Markdown,
}
