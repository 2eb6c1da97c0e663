//! Trace log bootstrap. The terminal belongs to the battle screen, so
//! everything goes to `~/.streets/streets.log` instead of stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

pub const LOG_ENV_VAR: &str = "STREETS_LOG";
pub const LOG_FILE: &str = "streets.log";

/// Installs the global subscriber. Filter comes from `STREETS_LOG`, default `info`.
pub fn init_logging(data_dir: &Path) -> io::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    fs::create_dir_all(data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    tracing::info!(target: "streets", version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}
