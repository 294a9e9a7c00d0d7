//! Diagnostics logging for the launcher.
//!
//! Off by default. `RUNCPU_LOG` takes [`EnvFilter`] directives, `RUNCPU_LOG_FILE` sends the
//! output to a file instead of stderr (which is nowhere on a GUI subsystem binary).

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

pub(crate) const RUNCPU_LOG_ENV: &str = "RUNCPU_LOG";
pub(crate) const RUNCPU_LOG_FILE_ENV: &str = "RUNCPU_LOG_FILE";

fn open_log_file(log_destination: &Path) -> CliResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_destination)
        .map_err(|fail| CliError::OpenLogFile(log_destination.display().to_string(), fail))
}

fn init_stderr(env_filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}

pub(crate) fn init_tracing() {
    let Ok(directives) = std::env::var(RUNCPU_LOG_ENV) else {
        return;
    };
    let env_filter = EnvFilter::builder().parse_lossy(directives);

    let log_destination = std::env::var_os(RUNCPU_LOG_FILE_ENV).map(PathBuf::from);
    match log_destination.as_deref().map(open_log_file) {
        Some(Ok(output_file)) => tracing_subscriber::fmt()
            .with_writer(output_file)
            .with_ansi(false)
            .with_env_filter(env_filter)
            .init(),
        Some(Err(fail)) => {
            init_stderr(env_filter);
            tracing::warn!(%fail, "falling back to stderr logging");
        }
        None => init_stderr(env_filter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runcpu.log");

        std::fs::write(&path, "first\n").unwrap();
        drop(open_log_file(&path).unwrap());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("runcpu.log");

        let error = open_log_file(&path).unwrap_err();
        assert!(matches!(error, CliError::OpenLogFile(ref at, _) if at.ends_with("runcpu.log")));
    }
}
