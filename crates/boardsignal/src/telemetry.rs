//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::BoardSignalError;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins when it is set and parses; otherwise `default_filter`
/// (usually [`BoardSignalConfig::log_filter`](crate::BoardSignalConfig))
/// is used. Fails if the fallback directive does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), BoardSignalError> {
    let filter = resolve_filter(EnvFilter::try_from_default_env().ok(), default_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| BoardSignalError::Telemetry(e.to_string()))
}

fn resolve_filter(
    from_env: Option<EnvFilter>,
    default_filter: &str,
) -> Result<EnvFilter, BoardSignalError> {
    match from_env {
        Some(filter) => Ok(filter),
        None => EnvFilter::try_new(default_filter).map_err(|e| {
            BoardSignalError::Telemetry(format!("bad filter {default_filter:?}: {e}"))
        }),
    }
}
