//! Diagnostic logging to a file under the user's data directory
//!
//! The terminal belongs to the UI, so log lines never go to stdout or stderr.

use anyhow::Result;
use directories::ProjectDirs;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = concat!(env!("CARGO_CRATE_NAME"), "=info");

const LOG_FILE_NAME: &str = "nps-feedback.log";

/// Where the log file lives
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "labirintar", "nps-feedback")
        .map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
}

/// Open the log file for appending, creating its directory
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber. Without a usable log file, logging is off.
pub fn init() {
    let Some(file) = log_path().and_then(|path| open_log_file(&path).ok()) else {
        return;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVE.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_targets_this_crate() {
        let crate_path = module_path!().split("::").next().unwrap_or_default();
        assert_eq!(DEFAULT_DIRECTIVE, format!("{crate_path}=info"));
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(DEFAULT_DIRECTIVE.parse::<tracing_subscriber::filter::Directive>().is_ok());
    }

    #[test]
    fn test_open_log_file_creates_directory_and_appends() {
        let dir = std::env::temp_dir().join(format!("nps-feedback-log-{}", std::process::id()));
        let path = dir.join("nested").join(LOG_FILE_NAME);

        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "first").unwrap();
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_log_path_is_a_file_in_data_dir() {
        if let Some(path) = log_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LOG_FILE_NAME));
        }
    }
}
