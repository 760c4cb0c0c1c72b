use std::io;
use tracing_subscriber::EnvFilter;

/// Level used when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn";

fn make_filter(level: Option<&str>) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| format!("invalid log level '{directive}': {e}").into()),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the stderr subscriber. Call once at startup.
///
/// Logs go to stderr so stdout stays clean for json/csv output. Colors only
/// when stderr is a terminal.
pub fn init(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let filter = make_filter(level)?;

    // a second init (tests) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init();
    Ok(())
}
