//! Tracing setup.
//!
//! The terminal belongs to the UI while folio runs, so log output always goes
//! to a file: either the one given on the command line or `folio.log` in the
//! user's cache directory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Maps `-v` occurrences to a level (0=error, 1=warn, 2=info, 3=debug, 4+=trace).
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().join("folio.log"))
}

/// Initialize the logging system, appending to `log_file`.
///
/// `RUST_LOG` overrides the verbosity-derived filter.
pub fn init_logging(verbosity: u8, log_file: &Path) -> Result<()> {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("folio={level}")));

    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(verbosity >= 3)
                .with_line_number(verbosity >= 3),
        )
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_mapping() {
        assert_eq!(level_for(0), "error");
        assert_eq!(level_for(2), "info");
        assert_eq!(level_for(3), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("folio.log");
        // A subscriber may already be set by another test; the file is
        // created either way.
        let _ = init_logging(2, &path);
        assert!(path.exists());
    }
}
