use tracing_subscriber::EnvFilter;

/// Workspace crates whose spans and events are shown.
const CRATE_TARGETS: &[&str] = &[
    "sedsize",
    "sedsize_grain",
    "sedsize_io",
    "sedsize_stats",
    "sedsize_wavelet",
];

/// Install the global subscriber, writing to stderr.
///
/// `-v` shows per-image progress, `-vv` per-stage detail, `-vvv` per-row
/// traces. A set `RUST_LOG` replaces the level derived from `verbosity`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}

/// Filter directives for the workspace crates at the level of `verbosity`.
fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
