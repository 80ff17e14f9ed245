//! Core library for the `agentdeck` server.
//!
//! A small HTTP glue layer for a project-management tool that
//! orchestrates CLI coding agents: it aggregates GitHub issues (with
//! linked pull requests) for a project and probes the Codex CLI's
//! installation and authentication state. All external systems sit
//! behind port traits so the core is testable without `git`, `gh`, or
//! `codex` installed.

pub mod adapters;
pub mod cli;
pub mod codex;
pub mod context;
pub mod issues;
pub mod ports;
pub mod server;

use std::sync::Arc;

use clap::Parser;

/// Run the server with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, the bind address
/// is unusable, or the server loop fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = cli::Args::try_parse_from(args).map_err(|err| err.to_string())?;
    let ctx = Arc::new(context::ServiceContext::live(&args.gh_bin, args.codex_bin));
    server::serve(&args.bind, ctx).await
}
