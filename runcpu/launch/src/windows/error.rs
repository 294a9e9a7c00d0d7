//! Windows system error codes.

use std::fmt::{Debug, Display};

use winapi::{
    shared::ntdef::MAKELANGID,
    um::{
        errhandlingapi::GetLastError,
        winbase::{FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS},
        winnt::{LANG_NEUTRAL, SUBLANG_DEFAULT},
    },
};

use crate::error::{Operation, PlatformError};

const MESSAGE_BUFFER_LEN: usize = 512;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WindowsError {
    /// Usually returned by [`GetLastError`].
    error: u32,
}

impl WindowsError {
    /// Generate new [`WindowsError`] from Windows system error code.
    pub fn new(error: u32) -> Self {
        Self { error }
    }

    /// Generate a new [`WindowsError`] from [`GetLastError`].
    pub fn last_error() -> Self {
        let error = unsafe { GetLastError() };
        Self { error }
    }

    /// Returns the system description of a Windows error code, in the user's language.
    ///
    /// # Arguments
    ///
    /// * `error` - Windows system error code.
    pub fn format_windows_error_code(error: u32) -> Option<String> {
        let mut buf = [0u16; MESSAGE_BUFFER_LEN];
        let language = MAKELANGID(LANG_NEUTRAL, SUBLANG_DEFAULT);

        // Number of `u16`s written, without the terminator. 0 on failure.
        let written = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                std::ptr::null(),
                error,
                language as _,
                buf.as_mut_ptr(),
                MESSAGE_BUFFER_LEN as _,
                std::ptr::null_mut(),
            )
        };
        if written == 0 {
            return None;
        }

        let message = buf.get(..written as usize)?;
        // Messages end with "\r\n".
        Some(String::from_utf16_lossy(message).trim_ascii().to_owned())
    }

    pub fn get_formatted_error(&self) -> Option<String> {
        Self::format_windows_error_code(self.error)
    }

    /// Attributes this error to the platform call that produced it.
    pub fn for_operation(self, operation: Operation) -> PlatformError {
        PlatformError::new(operation, self.error)
    }
}

impl Display for WindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}",
            self.get_formatted_error()
                .unwrap_or(crate::report::UNKNOWN_ERROR_DESCRIPTION.into())
        ))
    }
}

impl Debug for WindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowsError({}: {self})", self.error)
    }
}
