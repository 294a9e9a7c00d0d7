use winapi::um::{
    handleapi::{CloseHandle, INVALID_HANDLE_VALUE},
    winnt::HANDLE,
};

/// Owned process or thread [`HANDLE`], as returned in `PROCESS_INFORMATION`.
///
/// Closed exactly once, either by [`SafeHandle::close`] or on drop.
#[derive(Debug)]
pub struct SafeHandle {
    handle: HANDLE,
}

impl SafeHandle {
    /// Takes ownership of `handle`.
    pub fn from(handle: HANDLE) -> Self {
        Self { handle }
    }

    /// Raw handle for the `SetProcessAffinityMask`/`ResumeThread`/`TerminateProcess` calls.
    /// Null once closed.
    pub fn get(&self) -> HANDLE {
        self.handle
    }

    /// Null handles come from a failed create, `INVALID_HANDLE_VALUE` is never ours to close.
    fn is_valid(&self) -> bool {
        !self.handle.is_null() && self.handle != INVALID_HANDLE_VALUE
    }

    pub fn close(&mut self) {
        if self.is_valid() {
            tracing::trace!(handle = ?self.handle, "closing handle");
            unsafe { CloseHandle(self.handle) };
        }

        self.handle = std::ptr::null_mut();
    }
}

impl Drop for SafeHandle {
    fn drop(&mut self) {
        self.close()
    }
}
