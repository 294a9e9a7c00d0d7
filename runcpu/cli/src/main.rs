//! `runcpu [-a <hex mask>] [-d <dir>] -- <command line>`
//!
//! Starts `<command line>` hidden, pinned to the CPUs in the mask, and exits as soon as it is
//! running. Failures are shown in a dialog.

#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::process::ExitCode;

mod error;
mod logging;

#[cfg(target_os = "windows")]
fn main() -> ExitCode {
    use runcpu_launch::{
        windows::{raw_command_line, MessageBoxSink, WindowsPlatform},
        ExitStatus, Reporter,
    };

    logging::init_tracing();

    let raw = match raw_command_line() {
        Ok(raw) => raw,
        Err(failure) => {
            Reporter::new(MessageBoxSink).usage(&failure);
            return ExitStatus::Failure.into();
        }
    };

    let status = runcpu_launch::run(&raw, WindowsPlatform, MessageBoxSink);
    tracing::debug!(%status, "launcher done");
    status.into()
}

#[cfg(not(target_os = "windows"))]
fn main() -> ExitCode {
    logging::init_tracing();

    tracing::error!("process launch is only implemented on Windows");
    eprintln!("runcpu: unsupported platform, only Windows is supported");
    runcpu_launch::ExitStatus::Failure.into()
}
