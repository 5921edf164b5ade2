use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr so `--report json` output on stdout stays clean.
pub fn init_logger(verbose: bool, quiet: bool) {
    let default = if verbose {
        "kit_deps_checkr=debug,info"
    } else if quiet {
        "error"
    } else {
        "kit_deps_checkr=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
