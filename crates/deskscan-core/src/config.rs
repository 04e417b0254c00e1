//! Centralized configuration for Deskscan.
//!
//! Environment variable names, fallback paths, and the fixed strings used by
//! the presence check.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Deskscan";
    pub const WINDOW_TITLE: &'static str = "Deskscan demo";
    pub const START_URL: &'static str = "https://www.wps.cn";
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 768;
}

/// Desktop root discovery.
pub struct DesktopConfig;

impl DesktopConfig {
    /// Holds the current user's profile directory.
    pub const USER_PROFILE_VAR: &'static str = "USERPROFILE";
    /// Holds the machine-wide public profile directory.
    pub const PUBLIC_PROFILE_VAR: &'static str = "PUBLIC";
    pub const DESKTOP_DIR_NAME: &'static str = "Desktop";
    /// Used when `PUBLIC` is unset or empty.
    pub const FALLBACK_PUBLIC_DESKTOP: &'static str = r"C:\Users\Public\Desktop";
    /// Compared ASCII case-insensitively, without the dot.
    pub const SHORTCUT_EXTENSION: &'static str = "lnk";
}

/// Presence check defaults.
pub struct PresenceConfig;

impl PresenceConfig {
    pub const DEFAULT_EXPECTED_SHORTCUT: &'static str = "院校子系统基本版 2020.5.lnk";
    pub const NOTICE_TITLE: &'static str = "Notice";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expected_shortcut_is_a_shortcut() {
        assert!(PresenceConfig::DEFAULT_EXPECTED_SHORTCUT.ends_with(".lnk"));
    }

    #[test]
    fn test_fallback_public_desktop_ends_with_desktop() {
        assert!(DesktopConfig::FALLBACK_PUBLIC_DESKTOP.ends_with(DesktopConfig::DESKTOP_DIR_NAME));
    }
}
