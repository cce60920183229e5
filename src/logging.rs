//! Tracing setup for the binary.
//!
//! `RUST_LOG` wins when set; otherwise the given default level applies. The
//! interactive form logs to a file so output never lands on the alternate
//! screen.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::AppError;

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Log to stderr. A second call is a no-op.
pub fn init_stderr(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

/// Append logs to `path`. A second call is a no-op.
pub fn init_file(path: &Path, default_level: &str) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(4, format!("Failed to open log file '{}': {e}", path.display())))?;

    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
    Ok(())
}
