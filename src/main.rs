//! `kit-deps-checkr`: check that starter projects pin the current version of their kits.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the config and project tree ([`config::load_config`]).
//! 3. Build the GitHub source ([`registry::github`]).
//! 4. Either serve the report page ([`server`]), or check once:
//!    walk each ecosystem's tree ([`report::run`], [`walker`], [`ecosystem`])
//!    and render the requested report ([`report`]).
//! 5. Exit `0` (all known edges in sync), `1` (at least one
//!    [`models::VersionStatus::Drift`]) or `2` (the check failed).

mod cli;
mod config;
mod ecosystem;
mod logging;
mod models;
mod registry;
mod report;
mod server;
mod walker;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, ReportFormat};
use config::{load_config, node_count};
use registry::github::GitHubClient;
use registry::Source;
use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let source: Arc<dyn Source> = Arc::new(GitHubClient::new(config.source.clone())?);

    if cli.serve {
        let bind = cli.bind.unwrap_or(config.server.bind);
        let state = AppState {
            source,
            tree: Arc::new(config.tree),
        };
        return server::serve(&bind, state).await;
    }

    let edges: usize = config
        .tree
        .roots
        .iter()
        .map(|root| node_count(&root.projects))
        .sum();

    let spinner = if !cli.quiet && matches!(cli.report, ReportFormat::Terminal) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!(
            "checking {} kits and {} dependents",
            config.tree.roots.len(),
            edges
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = report::run(source, &config.tree).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let deps = match result {
        Ok(deps) => deps,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&deps, cli.verbose, cli.quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&deps)?),
        ReportFormat::Html => println!("{}", report::html::render(&deps)),
    }

    if deps.has_drift() {
        std::process::exit(1);
    }

    Ok(())
}
