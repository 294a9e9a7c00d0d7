use std::ptr;

use winapi::um::winuser::{MessageBoxW, MB_ICONSTOP, MB_OK};

use super::{error::WindowsError, to_wide};
use crate::report::ErrorSink;

/// Reports through a modal `MessageBoxW` without owner window.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageBoxSink;

impl ErrorSink for MessageBoxSink {
    fn describe(&self, code: u32) -> Option<String> {
        WindowsError::new(code).get_formatted_error()
    }

    fn show(&self, title: &str, message: &str) {
        let title = to_wide(title);
        let message = to_wide(message);

        unsafe {
            MessageBoxW(
                ptr::null_mut(),
                message.as_ptr(),
                title.as_ptr(),
                MB_OK | MB_ICONSTOP,
            );
        }
    }
}
