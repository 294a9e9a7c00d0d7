use thiserror::Error;

pub(crate) type CliResult<T, E = CliError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("Couldn't open log file at `{0}`: {1}")]
    OpenLogFile(String, std::io::Error),
}
