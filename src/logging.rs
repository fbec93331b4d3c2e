//! File-backed tracing setup. The TUI owns the terminal, so logs go to a
//! timestamped file under the platform data directory, with a `latest.log`
//! symlink on Unix for easy tailing.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn log_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("cannot determine data directory")?
        .join("telecom-master")
        .join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Install the global subscriber. Returns the log file path so main can
/// announce it. `RUST_LOG` controls the filter, default `info`.
pub fn init_logging() -> Result<PathBuf> {
    let dir = log_dir()?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = dir.join(format!("telecom-master_{timestamp}.log"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    #[cfg(unix)]
    {
        let latest = dir.join("latest.log");
        let _ = fs::remove_file(&latest);
        let _ = std::os::unix::fs::symlink(&log_path, &latest);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();

    Ok(log_path)
}
