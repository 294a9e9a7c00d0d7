//! The process control capability the launch sequence is written against.
//!
//! On Windows this is [`crate::windows::WindowsPlatform`], tests use a recording fake.

use runcpu_cmdline::AffinityMask;

use crate::error::PlatformResult;

/// Everything needed to create the target process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRequest<'a> {
    /// Passed verbatim as the command line, there is no separate application name.
    pub command_line: &'a str,
    /// `None` inherits the launcher's current directory.
    pub working_directory: Option<&'a str>,
}

/// Creates processes whose primary thread has not run a single instruction yet.
pub trait Platform {
    type Process: SuspendedProcess;

    /// Creates the process suspended, with its window hidden.
    fn create_suspended(&self, request: &CreateRequest<'_>) -> PlatformResult<Self::Process>;
}

/// A freshly created process and its (suspended) primary thread.
///
/// Implementors own both handles and must close each of them exactly once on drop.
pub trait SuspendedProcess {
    fn process_id(&self) -> u32;

    fn set_affinity(&mut self, mask: AffinityMask) -> PlatformResult<()>;

    /// Lets the primary thread run.
    fn resume(&mut self) -> PlatformResult<()>;

    fn terminate(&mut self, exit_code: u32) -> PlatformResult<()>;
}
