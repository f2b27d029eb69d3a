use crate::error::{Error, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "bunyan")]
const APP_NAME: &str = "shorts-stats";

/// Install the global subscriber: `RUST_LOG` filter (default `info`) and
/// human readable output on stdout. With the `bunyan` feature, JSON logs are
/// also written to `.logs/`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set or the log
/// directory cannot be created.
pub fn setup_logger() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    #[cfg(feature = "bunyan")]
    let registry = registry
        .with(tracing_bunyan_formatter::JsonStorageLayer)
        .with(bunyan_layer()?);

    registry
        .try_init()
        .map_err(|e| Error::other(format!("failed to install logger: {e}")))
}

#[cfg(feature = "bunyan")]
fn bunyan_layer() -> Result<
    tracing_bunyan_formatter::BunyanFormattingLayer<tracing_appender::rolling::RollingFileAppender>,
> {
    use std::{fs::create_dir_all, path::PathBuf};
    use tracing_appender::rolling;

    let log_dir_path = PathBuf::from(".logs");
    create_dir_all(&log_dir_path)?;

    let logfile = if cfg!(debug_assertions) {
        rolling::daily(log_dir_path, "shorts-stats.log")
    } else {
        rolling::never(log_dir_path, "shorts-stats.log")
    };

    Ok(tracing_bunyan_formatter::BunyanFormattingLayer::new(
        APP_NAME.into(),
        logfile,
    ))
}
