//! Interprets the launcher's own flags.

use std::{fmt, str::FromStr};

use tracing::debug;

use crate::{
    error::{UsageError, UsageResult},
    tokenizer::{tokenize, ArgumentList, PayloadCommandLine, Tokenized},
};

pub const AFFINITY_FLAG: &str = "-a";
pub const DIRECTORY_FLAG: &str = "-d";

/// Maximum number of hex digits accepted for `-a`.
const AFFINITY_MAX_DIGITS: usize = 8;

/// Set of CPUs the launched process may run on, one bit per logical processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffinityMask(u32);

impl AffinityMask {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Parses 1 to 8 hex digits, without prefix or sign.
impl FromStr for AffinityMask {
    type Err = UsageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty()
            || value.len() > AFFINITY_MAX_DIGITS
            || !value.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(UsageError::ImproperAffinity);
        }

        u32::from_str_radix(value, 16)
            .map(Self)
            .map_err(|_| UsageError::ImproperAffinity)
    }
}

impl fmt::Display for AffinityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// What the launcher was asked to do with the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub affinity: AffinityMask,
    /// `None` inherits the launcher's current directory.
    pub working_directory: Option<String>,
}

impl LaunchConfig {
    pub fn new(affinity: AffinityMask) -> Self {
        Self {
            affinity,
            working_directory: None,
        }
    }

    pub fn working_directory(&self) -> Option<&str> {
        self.working_directory.as_deref()
    }
}

/// Reads `-a` and `-d` out of `arguments`.
///
/// The first token is the launcher's own name and is skipped. Unknown tokens are ignored, a
/// repeated flag keeps its last value.
pub fn interpret(arguments: &ArgumentList) -> UsageResult<LaunchConfig> {
    if arguments.len() < 2 {
        return Err(UsageError::Usage);
    }

    let mut affinity = None;
    let mut working_directory = None;

    let mut tokens = arguments.iter().skip(1);
    while let Some(token) = tokens.next() {
        match token {
            AFFINITY_FLAG => {
                let value = tokens.next().ok_or(UsageError::NoAffinityData)?;
                affinity = Some(value.parse::<AffinityMask>()?);
            }
            DIRECTORY_FLAG => {
                let value = tokens.next().ok_or(UsageError::NoDirectoryData)?;
                working_directory = Some(value.to_owned());
            }
            ignored => debug!(token = ignored, "ignoring unrecognized argument"),
        }
    }

    Ok(LaunchConfig {
        affinity: affinity.ok_or(UsageError::MissingAffinity)?,
        working_directory,
    })
}

/// A fully parsed launcher command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub config: LaunchConfig,
    pub payload: PayloadCommandLine<'a>,
}

impl<'a> Invocation<'a> {
    /// Tokenizes and interprets `raw`.
    ///
    /// The argument list only lives for the duration of this call, the returned payload
    /// borrows `raw` directly.
    pub fn parse(raw: &'a str) -> UsageResult<Self> {
        let Tokenized { arguments, payload } = tokenize(raw);

        let config = interpret(&arguments)?;
        drop(arguments);

        let payload = payload.ok_or(UsageError::MissingSeparator)?;
        debug!(%config.affinity, ?config.working_directory, %payload, "parsed invocation");

        Ok(Self { config, payload })
    }
}
