//! Failures of the platform calls driven by the launch sequence.

use std::fmt;

use thiserror::Error;

/// The platform call that failed, displayed the way it is named in dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateProcess,
    SetProcessAffinityMask,
    ResumeThread,
    TerminateProcess,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateProcess => "CreateProcess()",
            Self::SetProcessAffinityMask => "SetProcessAffinityMask()",
            Self::ResumeThread => "ResumeThread()",
            Self::TerminateProcess => "TerminateProcess()",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A platform call failed with the given last-error `code`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{operation} failed with {code}")]
pub struct PlatformError {
    pub operation: Operation,
    pub code: u32,
}

impl PlatformError {
    pub const fn new(operation: Operation, code: u32) -> Self {
        Self { operation, code }
    }
}

pub type PlatformResult<T, E = PlatformError> = Result<T, E>;
