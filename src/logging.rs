use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. Per-task results are printed by the
/// batch, so the non-verbose default only lets through problems with the run
/// itself.
pub fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "debug" } else { "warn" })
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` when it is set.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
