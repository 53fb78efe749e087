//! Script replay for the `run` command
//!
//! A script is a JSON array of tagged calls (see [`Call`]). Calls run in
//! order against one toolkit, so later calls observe the plans earlier ones
//! created. Failed calls are reported in their envelopes and do not stop the
//! replay; only an unreadable or malformed script is an error.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use log::{debug, info};
use trellis_core::{Call, Envelope, OrchestrationTools};

use crate::{
    args::{OutputFormat, RunArgs},
    renderer::TerminalRenderer,
};

/// Command handler for the CLI
pub struct Cli {
    tools: OrchestrationTools,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tools: OrchestrationTools, renderer: TerminalRenderer) -> Self {
        Self { tools, renderer }
    }

    /// Replay a script file and print the resulting envelopes.
    pub fn run_script(&mut self, args: &RunArgs) -> Result<()> {
        let source = read_source(&args.file)?;
        let calls = parse_script(&source)
            .with_context(|| format!("Invalid script {}", args.file.display()))?;
        info!("Replaying {} calls from {}", calls.len(), args.file.display());

        let envelopes = replay(&mut self.tools, &calls);
        let failed = envelopes.iter().filter(|e| !e.is_ok()).count();
        debug!("{failed} of {} calls failed", envelopes.len());

        match args.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&envelopes)
                    .context("Failed to serialize envelopes")?;
                println!("{json}");
            }
            OutputFormat::Markdown => {
                self.renderer.render(&render_markdown(&envelopes))?;
            }
        }
        Ok(())
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read script from stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read script {}", path.display()))
}

/// Parse a script into its calls.
pub fn parse_script(source: &str) -> serde_json::Result<Vec<Call>> {
    serde_json::from_str(source)
}

/// Run each call in order, collecting one envelope per call.
pub fn replay(tools: &mut OrchestrationTools, calls: &[Call]) -> Vec<Envelope> {
    calls.iter().map(|call| tools.dispatch(call)).collect()
}

/// Markdown report of a replay: one numbered section per call.
pub fn render_markdown(envelopes: &[Envelope]) -> String {
    let mut output = String::new();
    for (i, envelope) in envelopes.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "## {}. {} [{}]\n\n",
            i + 1,
            envelope.operation,
            envelope.metadata.session
        ));
        output.push_str(&envelope.to_string());
    }
    if output.is_empty() {
        output.push_str("Script contained no calls.\n");
    }
    output
}
