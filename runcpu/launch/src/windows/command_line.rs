use runcpu_cmdline::{UsageError, UsageResult};
use winapi::um::processenv::GetCommandLineW;

/// The launcher's own command line, exactly as the OS handed it over.
///
/// Fails when it is not valid UTF-16, the payload could not be passed on unchanged otherwise.
pub fn raw_command_line() -> UsageResult<String> {
    let ptr = unsafe { GetCommandLineW() };
    if ptr.is_null() {
        return Ok(String::new());
    }

    let len = (0..)
        .take_while(|&i| unsafe { *ptr.offset(i) != 0 })
        .count();
    let wide = unsafe { std::slice::from_raw_parts(ptr, len) };

    String::from_utf16(wide).map_err(|_| UsageError::InvalidEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_program() {
        let raw = raw_command_line().expect("test runner command line is valid UTF-16");
        assert!(!raw.trim().is_empty());
    }
}
