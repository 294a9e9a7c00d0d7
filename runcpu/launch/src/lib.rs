//! Launches a process pinned to a CPU affinity mask.
//!
//! [`run`] is the whole launcher: parse the raw command line, then run the payload through the
//! [`Launcher`] sequence. It is generic over the [`Platform`] and the [`ErrorSink`], the
//! Windows implementations of both live in the `windows` module.

pub mod error;
pub mod platform;
pub mod report;
pub mod sequencer;
#[cfg(target_os = "windows")]
pub mod windows;

use runcpu_cmdline::Invocation;

pub use error::{Operation, PlatformError, PlatformResult};
pub use platform::{CreateRequest, Platform, SuspendedProcess};
pub use report::{ErrorSink, Reporter, PLATFORM_TITLE, USAGE_TITLE};
pub use sequencer::{ExitStatus, LaunchState, Launcher, TERMINATED_EXIT_CODE};

/// Parses `raw` and launches its payload.
///
/// Usage errors are reported before `platform` is touched.
pub fn run<P, S>(raw: &str, platform: P, sink: S) -> ExitStatus
where
    P: Platform,
    S: ErrorSink,
{
    let launcher = Launcher::new(platform, Reporter::new(sink));

    match Invocation::parse(raw) {
        Ok(Invocation { config, payload }) => launcher.launch(&payload, &config),
        Err(failure) => {
            launcher.reporter().usage(&failure);
            ExitStatus::Failure
        }
    }
}
