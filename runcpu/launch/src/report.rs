//! User facing error reporting.
//!
//! `runcpu` has no console, so every failure ends up in a blocking dialog.

use runcpu_cmdline::UsageError;
use tracing::error;

use crate::error::PlatformError;

pub const USAGE_TITLE: &str = "Improper parameters";
pub const PLATFORM_TITLE: &str = "WinAPI call failed";

/// Used when the sink has no description for an error code.
pub const UNKNOWN_ERROR_DESCRIPTION: &str = "Not a valid Windows error code";

/// Where reports are displayed.
pub trait ErrorSink {
    /// Human readable description of a platform error code, if the platform has one.
    fn describe(&self, code: u32) -> Option<String>;

    /// Shows `message` to the user, returns once it was acknowledged.
    fn show(&self, title: &str, message: &str);
}

impl<S: ErrorSink + ?Sized> ErrorSink for &S {
    fn describe(&self, code: u32) -> Option<String> {
        (**self).describe(code)
    }

    fn show(&self, title: &str, message: &str) {
        (**self).show(title, message)
    }
}

/// Formats failures and hands them to an [`ErrorSink`].
#[derive(Debug, Clone)]
pub struct Reporter<S> {
    sink: S,
}

impl<S: ErrorSink> Reporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// `"{operation} failed with {code} : {description}"`
    pub fn format_platform(&self, failure: &PlatformError) -> String {
        let description = self
            .sink
            .describe(failure.code)
            .unwrap_or_else(|| UNKNOWN_ERROR_DESCRIPTION.to_owned());

        format!("{failure} : {description}")
    }

    /// Displays a failed platform call, returns the message that was shown.
    pub fn platform(&self, failure: &PlatformError) -> String {
        let message = self.format_platform(failure);
        error!(operation = %failure.operation, code = failure.code, "{message}");

        self.sink.show(PLATFORM_TITLE, &message);
        message
    }

    pub fn usage(&self, failure: &UsageError) {
        error!(%failure, "improper parameters");

        self.sink.show(USAGE_TITLE, &failure.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::Operation;

    #[derive(Default)]
    struct Recorder {
        shown: RefCell<Vec<(String, String)>>,
    }

    impl ErrorSink for Recorder {
        fn describe(&self, code: u32) -> Option<String> {
            (code == 2).then(|| "The system cannot find the file specified.".to_owned())
        }

        fn show(&self, title: &str, message: &str) {
            self.shown
                .borrow_mut()
                .push((title.to_owned(), message.to_owned()));
        }
    }

    #[test]
    fn platform_message() {
        let recorder = Recorder::default();
        let reporter = Reporter::new(&recorder);

        let message = reporter.platform(&PlatformError::new(Operation::CreateProcess, 2));

        assert_eq!(
            message,
            "CreateProcess() failed with 2 : The system cannot find the file specified."
        );
        assert_eq!(
            recorder.shown.into_inner(),
            [(PLATFORM_TITLE.to_owned(), message)]
        );
    }

    #[test]
    fn platform_message_unknown_code() {
        let reporter = Reporter::new(Recorder::default());

        assert_eq!(
            reporter.format_platform(&PlatformError::new(Operation::ResumeThread, 13370)),
            "ResumeThread() failed with 13370 : Not a valid Windows error code"
        );
    }

    #[test]
    fn usage_message() {
        let recorder = Recorder::default();
        Reporter::new(&recorder).usage(&UsageError::NoAffinityData);

        assert_eq!(
            recorder.shown.into_inner(),
            [(USAGE_TITLE.to_owned(), "No data after -a.".to_owned())]
        );
    }
}
