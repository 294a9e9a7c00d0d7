//! Errors produced while reading the launcher's own command line.

use thiserror::Error;

/// Usage text shown when the launcher is started without any argument.
pub const USAGE: &str = "Usage : [-a affinity] [-d working_dir] -- <cmdline>";

/// Malformed or missing command line input.
///
/// Every variant is reported to the user as-is, the [`std::fmt::Display`] output is the
/// dialog body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{USAGE}")]
    Usage,

    #[error("No data after -a.")]
    NoAffinityData,

    #[error("Improper affinity specification")]
    ImproperAffinity,

    #[error("No data after -d.")]
    NoDirectoryData,

    #[error("No affinity mask specified, use -a.")]
    MissingAffinity,

    #[error("No -- before the command line.")]
    MissingSeparator,

    #[error("No command line after --.")]
    EmptyCommandLine,

    #[error("The command line is not valid UTF-16.")]
    InvalidEncoding,
}

pub type UsageResult<T, E = UsageError> = Result<T, E>;
