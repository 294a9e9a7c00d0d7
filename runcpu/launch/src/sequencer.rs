//! The launch sequence: create suspended, pin, resume.
//!
//! The target is created with its primary thread suspended, so not a single instruction of it
//! runs before the affinity mask is in place. Should pinning or resuming fail, the target is
//! terminated before it ever ran.
//!
//! ```text
//! Start -> CreatedSuspended -> AffinitySet -> Resumed -> Done
//!                |                  |
//!                +------------------+--> TerminatedOnError
//! ```

use std::{fmt, process::ExitCode};

use runcpu_cmdline::{LaunchConfig, PayloadCommandLine, UsageError};
use tracing::{debug, Level};

use crate::{
    error::{PlatformError, PlatformResult},
    platform::{CreateRequest, Platform, SuspendedProcess},
    report::{ErrorSink, Reporter},
};

/// Exit code given to a target that is terminated during rollback.
pub const TERMINATED_EXIT_CODE: u32 = 255;

/// Steps of the launch sequence, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Start,
    CreatedSuspended,
    AffinitySet,
    Resumed,
    Done,
    TerminatedOnError,
}

/// Exit status of the launcher itself, never the target's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Drives a [`Platform`] through the launch sequence, reporting every failure.
pub struct Launcher<P, S> {
    platform: P,
    reporter: Reporter<S>,
}

impl<P, S> Launcher<P, S>
where
    P: Platform,
    S: ErrorSink,
{
    pub fn new(platform: P, reporter: Reporter<S>) -> Self {
        Self { platform, reporter }
    }

    pub fn reporter(&self) -> &Reporter<S> {
        &self.reporter
    }

    /// Runs `payload` pinned to `config.affinity`.
    ///
    /// Returns once the target was resumed, its own exit is not waited for.
    #[tracing::instrument(level = Level::DEBUG, skip(self, payload), fields(%payload), ret)]
    pub fn launch(&self, payload: &PayloadCommandLine<'_>, config: &LaunchConfig) -> ExitStatus {
        if payload.is_empty() {
            self.reporter.usage(&UsageError::EmptyCommandLine);
            return ExitStatus::Failure;
        }

        let request = CreateRequest {
            command_line: payload.as_str(),
            working_directory: config.working_directory(),
        };

        transition(LaunchState::Start);
        let mut process = match self.platform.create_suspended(&request) {
            Ok(process) => process,
            Err(failure) => {
                self.reporter.platform(&failure);
                return ExitStatus::Failure;
            }
        };
        debug!(pid = process.process_id(), "target created");
        transition(LaunchState::CreatedSuspended);

        // `process` closes both handles when it goes out of scope, on every path below.
        match Self::pin_and_resume(&mut process, config) {
            Ok(()) => {
                transition(LaunchState::Done);
                ExitStatus::Success
            }
            Err(failure) => {
                self.reporter.platform(&failure);
                self.roll_back(&mut process);
                ExitStatus::Failure
            }
        }
    }

    fn pin_and_resume(process: &mut P::Process, config: &LaunchConfig) -> PlatformResult<()> {
        process.set_affinity(config.affinity)?;
        transition(LaunchState::AffinitySet);

        process.resume()?;
        transition(LaunchState::Resumed);

        Ok(())
    }

    /// Terminates the still suspended target. A failure here is reported, never retried.
    fn roll_back(&self, process: &mut P::Process) {
        if let Err(failure) = process.terminate(TERMINATED_EXIT_CODE) {
            self.report_secondary(&failure);
        }
        transition(LaunchState::TerminatedOnError);
    }

    fn report_secondary(&self, failure: &PlatformError) {
        debug!(%failure, "rollback failed, target may be left suspended");
        self.reporter.platform(failure);
    }
}

fn transition(state: LaunchState) {
    debug!(?state, "launch sequence");
}
