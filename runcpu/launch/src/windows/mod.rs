//! Windows implementation of [`Platform`](crate::Platform) and [`ErrorSink`](crate::ErrorSink).

pub mod command_line;
pub mod dialog;
pub mod error;
pub mod handle;
pub mod process;

pub use command_line::raw_command_line;
pub use dialog::MessageBoxSink;
pub use error::WindowsError;
pub use handle::SafeHandle;
pub use process::{WindowsPlatform, WindowsProcess};

/// Null terminated UTF-16 copy of `string`, for `W` functions.
pub(crate) fn to_wide<T: AsRef<str>>(string: T) -> Vec<u16> {
    string.as_ref().encode_utf16().chain(Some(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_is_null_terminated() {
        assert_eq!(to_wide("ab"), [97u16, 98, 0]);
        assert_eq!(to_wide("€"), [0x20ac, 0]);
        assert_eq!(to_wide(""), [0]);
    }
}
