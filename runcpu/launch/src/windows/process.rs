//! Suspended process creation through `CreateProcessW`.

use std::{mem, ptr};

use runcpu_cmdline::AffinityMask;
use tracing::Level;
use winapi::{
    shared::minwindef::FALSE,
    um::{
        processthreadsapi::{
            CreateProcessW, ResumeThread, TerminateProcess, PROCESS_INFORMATION, STARTUPINFOW,
        },
        winbase::{SetProcessAffinityMask, CREATE_SUSPENDED, STARTF_USESHOWWINDOW},
        winuser::SW_HIDE,
    },
};

use super::{error::WindowsError, handle::SafeHandle, to_wide};
use crate::{
    error::{Operation, PlatformResult},
    platform::{CreateRequest, Platform, SuspendedProcess},
};

/// The real thing: processes are created with `CreateProcessW`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    type Process = WindowsProcess;

    #[tracing::instrument(level = Level::DEBUG, skip(self), err)]
    fn create_suspended(&self, request: &CreateRequest<'_>) -> PlatformResult<WindowsProcess> {
        // `CreateProcessW` may write to the command line buffer.
        let mut command_line = to_wide(request.command_line);
        let working_directory = request.working_directory.map(to_wide);

        let mut startup_info = STARTUPINFOW {
            cb: mem::size_of::<STARTUPINFOW>() as u32,
            dwFlags: STARTF_USESHOWWINDOW,
            wShowWindow: SW_HIDE as u16,
            ..unsafe { mem::zeroed() }
        };
        let mut process_info: PROCESS_INFORMATION = unsafe { mem::zeroed() };

        let ret = unsafe {
            CreateProcessW(
                ptr::null(),
                command_line.as_mut_ptr(),
                ptr::null_mut(),
                ptr::null_mut(),
                FALSE,
                CREATE_SUSPENDED,
                ptr::null_mut(),
                working_directory
                    .as_ref()
                    .map_or(ptr::null(), |directory| directory.as_ptr()),
                &mut startup_info,
                &mut process_info,
            )
        };

        if ret == 0 {
            return Err(WindowsError::last_error().for_operation(Operation::CreateProcess));
        }

        Ok(WindowsProcess {
            process: SafeHandle::from(process_info.hProcess),
            thread: SafeHandle::from(process_info.hThread),
            process_id: process_info.dwProcessId,
        })
    }
}

/// Handles returned by [`CreateProcessW`] for a process created suspended.
///
/// Both [`SafeHandle`]s are closed on drop, the process itself keeps running (or stays
/// suspended) regardless.
#[derive(Debug)]
pub struct WindowsProcess {
    process: SafeHandle,
    thread: SafeHandle,
    process_id: u32,
}

impl SuspendedProcess for WindowsProcess {
    fn process_id(&self) -> u32 {
        self.process_id
    }

    fn set_affinity(&mut self, mask: AffinityMask) -> PlatformResult<()> {
        let ret = unsafe { SetProcessAffinityMask(self.process.get(), mask.bits()) };

        if ret == 0 {
            return Err(WindowsError::last_error().for_operation(Operation::SetProcessAffinityMask));
        }
        Ok(())
    }

    fn resume(&mut self) -> PlatformResult<()> {
        // ResumeThread: If the function fails, the return value is (DWORD) -1
        if unsafe { ResumeThread(self.thread.get()) } == u32::MAX {
            return Err(WindowsError::last_error().for_operation(Operation::ResumeThread));
        }
        Ok(())
    }

    fn terminate(&mut self, exit_code: u32) -> PlatformResult<()> {
        tracing::debug!(pid = self.process_id, exit_code, "terminating process");

        if unsafe { TerminateProcess(self.process.get(), exit_code) } == 0 {
            return Err(WindowsError::last_error().for_operation(Operation::TerminateProcess));
        }
        Ok(())
    }
}
