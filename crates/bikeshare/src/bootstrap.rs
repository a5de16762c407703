use std::path::{Path, PathBuf};
use std::sync::Arc;

use bikeshare_core::error::BikeshareError;
use bikeshare_core::models::City;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto an [`EnvFilter`] directive.
///
/// Unknown names fall back to `"warn"`.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "warn",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr, or to `log_file` (created or truncated, no ANSI
/// colours) when one is given.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = file_layer.is_none().then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

// ── Data-directory discovery ───────────────────────────────────────────────────

/// Pick the directory holding the city CSV files.
///
/// An explicit directory must exist. Otherwise `base/data` and then `base`
/// are checked for at least one known city file; `base` is the fallback
/// when neither has one (the load then reports the missing file).
pub fn resolve_data_dir(explicit: Option<&Path>, base: &Path) -> Result<PathBuf, BikeshareError> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(BikeshareError::DataDirNotFound(dir.to_path_buf()));
        }
        return Ok(dir.to_path_buf());
    }

    let candidates = [base.join("data"), base.to_path_buf()];
    let found = candidates
        .iter()
        .find(|dir| City::ALL.iter().any(|c| dir.join(c.file_name()).is_file()));

    Ok(found.cloned().unwrap_or_else(|| base.to_path_buf()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
