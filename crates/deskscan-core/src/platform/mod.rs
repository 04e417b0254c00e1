//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live in this module.
//!
//! - `paths` - Desktop root directories
//! - `shell` - COM shell-automation session
//! - `notify` - Blocking message notifiers

pub mod notify;
pub mod paths;
pub mod shell;

pub use notify::{LogNotifier, MessageBoxNotifier};
pub use paths::DesktopRoots;
pub use shell::ShellSession;

/// Returns the current platform name.
pub fn current_platform() -> &'static str {
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_platform() {
        let platform = current_platform();
        assert!(["linux", "windows", "macos", "unknown"].contains(&platform));
    }
}
