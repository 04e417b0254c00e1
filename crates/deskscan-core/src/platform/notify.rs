//! Blocking message notifiers.
//!
//! # Platform Behavior
//! - **Windows**: `MessageBoxW` with an information icon
//! - **Other platforms**: the message is logged at `warn`

use crate::presence::Notifier;
use tracing::warn;

/// Modal OS message box.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageBoxNotifier;

impl Notifier for MessageBoxNotifier {
    #[cfg(windows)]
    #[allow(unsafe_code)]
    fn show_blocking_message(&self, title: &str, message: &str) {
        use std::ptr;
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            MessageBoxW, MB_ICONINFORMATION, MB_OK,
        };

        let title_w = to_wide(title);
        let message_w = to_wide(message);
        // SAFETY: both buffers are NUL-terminated and live across the call;
        // a null owner window is allowed.
        let result = unsafe {
            MessageBoxW(
                ptr::null_mut(),
                message_w.as_ptr(),
                title_w.as_ptr(),
                MB_OK | MB_ICONINFORMATION,
            )
        };
        if result == 0 {
            warn!(
                "Failed to show message box: {}",
                std::io::Error::last_os_error()
            );
        }
    }

    #[cfg(not(windows))]
    fn show_blocking_message(&self, title: &str, message: &str) {
        LogNotifier.show_blocking_message(title, message);
    }
}

/// Writes the message to the log instead of showing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_blocking_message(&self, title: &str, message: &str) {
        warn!("[{}] {}", title, message);
    }
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
