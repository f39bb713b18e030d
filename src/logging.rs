use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sends tracing output to `log_path`. The terminal belongs to the TUI, so
/// nothing is written to stdout or stderr.
///
/// `RUST_LOG` wins when set; otherwise everything at info and above is kept.
pub(crate) fn init(log_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .compact()
                .with_writer(Arc::new(log_file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
