//! Trellis CLI Application
//!
//! Serves the plan orchestration tools over MCP and replays operation
//! scripts from the command line.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TrellisMcpServer};
use renderer::TerminalRenderer;
use trellis_core::{OrchestrationTools, PlanStoreBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        no_color,
        default_max_tasks,
        max_tasks_ceiling,
        max_actions_ceiling,
        command,
    } = Args::parse();

    let store = PlanStoreBuilder::new()
        .with_default_max_tasks(default_max_tasks)
        .with_max_tasks_ceiling(max_tasks_ceiling)
        .with_max_actions_ceiling(max_actions_ceiling)
        .build()
        .context("Failed to initialize plan store")?;
    let tools = OrchestrationTools::new(store);

    info!("Trellis started");

    match command {
        Commands::Serve => {
            info!("Starting Trellis MCP server");
            run_stdio_server(TrellisMcpServer::new(tools))
                .await
                .context("MCP server failed")
        }
        Commands::Run(run) => {
            Cli::new(tools, TerminalRenderer::new(!no_color)).run_script(&run)
        }
    }
}
