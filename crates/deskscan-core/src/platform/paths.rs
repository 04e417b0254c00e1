//! Desktop root directories.
//!
//! Two roots are scanned, in this order:
//! - the current user's desktop, `%USERPROFILE%\Desktop`
//! - the public desktop, `%PUBLIC%\Desktop`, or `C:\Users\Public\Desktop`
//!   when `PUBLIC` is unset or empty

use crate::config::DesktopConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The ordered pair of desktop directories to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopRoots {
    /// The user's desktop. `None` when no profile directory could be found.
    pub user: Option<PathBuf>,
    /// The machine-wide public desktop.
    pub public: PathBuf,
}

impl DesktopRoots {
    /// Read the roots from the process environment.
    ///
    /// When `USERPROFILE` is missing (non-Windows hosts), the home directory
    /// reported by `dirs` stands in for it.
    pub fn from_env() -> Self {
        let user_profile = non_empty_var(DesktopConfig::USER_PROFILE_VAR).or_else(|| {
            let home = dirs::home_dir().map(|h| h.to_string_lossy().into_owned());
            if home.is_some() {
                debug!(
                    "{} is not set, using home directory",
                    DesktopConfig::USER_PROFILE_VAR
                );
            }
            home
        });
        let public_profile = non_empty_var(DesktopConfig::PUBLIC_PROFILE_VAR);

        Self::from_vars(user_profile.as_deref(), public_profile.as_deref())
    }

    /// Compute the roots from explicit profile values.
    ///
    /// Empty strings are treated the same as missing values.
    pub fn from_vars(user_profile: Option<&str>, public_profile: Option<&str>) -> Self {
        let user = match user_profile.filter(|v| !v.is_empty()) {
            Some(profile) => Some(desktop_under(Path::new(profile))),
            None => {
                warn!("No user profile directory; skipping the user desktop");
                None
            }
        };

        let public = match public_profile.filter(|v| !v.is_empty()) {
            Some(profile) => desktop_under(Path::new(profile)),
            None => PathBuf::from(DesktopConfig::FALLBACK_PUBLIC_DESKTOP),
        };

        Self { user, public }
    }

    /// The roots in scan order: user desktop first, public desktop last.
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.user
            .iter()
            .cloned()
            .chain(std::iter::once(self.public.clone()))
            .collect()
    }
}

fn desktop_under(profile: &Path) -> PathBuf {
    profile.join(DesktopConfig::DESKTOP_DIR_NAME)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_fallback_when_empty() {
        let roots = DesktopRoots::from_vars(Some(r"C:\Users\alice"), Some(""));
        assert_eq!(roots.public, PathBuf::from(r"C:\Users\Public\Desktop"));
    }

    #[test]
    fn test_public_fallback_when_unset() {
        let roots = DesktopRoots::from_vars(Some(r"C:\Users\alice"), None);
        assert_eq!(roots.public, PathBuf::from(DesktopConfig::FALLBACK_PUBLIC_DESKTOP));
    }

    #[test]
    fn test_public_from_variable() {
        let roots = DesktopRoots::from_vars(None, Some(r"D:\Shared"));
        assert_eq!(roots.public, Path::new(r"D:\Shared").join("Desktop"));
    }

    #[test]
    fn test_scan_order_user_then_public() {
        let roots = DesktopRoots::from_vars(Some(r"C:\Users\alice"), Some(r"C:\Users\Public"));
        let order = roots.to_vec();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0], Path::new(r"C:\Users\alice").join("Desktop"));
        assert_eq!(order[1], Path::new(r"C:\Users\Public").join("Desktop"));
    }

    #[test]
    fn test_missing_user_profile_leaves_public_only() {
        let roots = DesktopRoots::from_vars(Some(""), None);
        assert!(roots.user.is_none());
        assert_eq!(
            roots.to_vec(),
            vec![PathBuf::from(DesktopConfig::FALLBACK_PUBLIC_DESKTOP)]
        );
    }
}
