use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `fmt` subscriber. `level` is an `EnvFilter` directive
/// string such as `info` or `message_store=debug,mongodb=warn`; an invalid
/// directive falls back to `info`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init: tests may install a subscriber more than once
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
