//! Structured logging setup.
//!
//! Logs go to stderr so that stdout carries nothing but emitted schemas.

use capnparquet_schema::{Error, ErrorKind, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; `default_filter` applies when it is unset
/// or unparsable.
///
/// # Errors
///
/// Returns an internal error if the default filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| {
            Error::new(ErrorKind::Internal(format!(
                "invalid log filter '{default_filter}': {e}"
            )))
        })?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| Error::new(ErrorKind::Internal(format!("failed to install logger: {e}"))))
}
