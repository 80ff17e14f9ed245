//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for the `agentdeck` server.
#[derive(Debug, Parser)]
#[command(name = "agentdeck", version, about = "Serve project-management endpoints for CLI coding agents")]
pub struct Args {
    /// Socket address to bind (host:port).
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: String,

    /// GitHub CLI binary to invoke.
    #[arg(long, default_value = "gh")]
    pub gh_bin: String,

    /// Codex CLI binary path (default: search PATH and npm global bins).
    #[arg(long)]
    pub codex_bin: Option<PathBuf>,
}
