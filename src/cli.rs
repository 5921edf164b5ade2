use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kit-deps-checkr",
    about = "Check that starter projects pin the current version of their kits",
    version
)]
pub struct Cli {
    /// Config file [default: ./.kit-deps-checkr/config.toml, fallback ~/.config/kit-deps-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format for a one-shot check
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Serve the report page instead of checking once
    #[arg(long)]
    pub serve: bool,

    /// Address to listen on with --serve [default: from config, 127.0.0.1:3000]
    #[arg(long, value_name = "ADDR", requires = "serve")]
    pub bind: Option<String>,

    /// Show every edge (not just drift) and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Html,
}
