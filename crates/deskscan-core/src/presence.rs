//! Installed-application check on top of a shortcut scan.

use crate::config::PresenceConfig;
use crate::shortcut::ShortcutIndex;
use std::path::Path;
use tracing::{debug, info};

/// Surface for blocking, user-visible messages.
///
/// Implementations must not panic; failures are theirs to log.
pub trait Notifier {
    fn show_blocking_message(&self, title: &str, message: &str);
}

/// The title/message pair shown when the expected shortcut is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceNotice {
    pub title: String,
    pub message: String,
}

impl PresenceNotice {
    /// Default notice for a shortcut file name, e.g. `Tool 1.0.lnk`
    /// gives "Tool 1.0 has not been downloaded".
    pub fn for_shortcut(expected_name: &str) -> Self {
        let display = Path::new(expected_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| expected_name.to_string());

        Self {
            title: PresenceConfig::NOTICE_TITLE.to_string(),
            message: format!("{display} has not been downloaded"),
        }
    }
}

/// Whether `expected_name` is a key of `index`.
///
/// When it is not, `notifier` is asked to show `notice` once before this
/// returns.
pub fn is_present(
    index: &ShortcutIndex,
    expected_name: &str,
    notifier: &dyn Notifier,
    notice: &PresenceNotice,
) -> bool {
    if let Some(target) = index.get(expected_name) {
        debug!("{} is installed at {}", expected_name, target);
        return true;
    }

    info!("{} was not found on the desktop", expected_name);
    notifier.show_blocking_message(&notice.title, &notice.message);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::ShortcutEntry;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn show_blocking_message(&self, title: &str, message: &str) {
            self.calls
                .borrow_mut()
                .push((title.to_string(), message.to_string()));
        }
    }

    fn app_index() -> ShortcutIndex {
        [ShortcutEntry::new("App.lnk", r"C:\App\app.exe")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_present_shortcut_shows_nothing() {
        let notifier = RecordingNotifier::default();
        let notice = PresenceNotice::for_shortcut("App.lnk");
        assert!(is_present(&app_index(), "App.lnk", &notifier, &notice));
        assert!(notifier.calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_shortcut_notifies_once() {
        let notifier = RecordingNotifier::default();
        let notice = PresenceNotice::for_shortcut("Missing.lnk");
        assert!(!is_present(&app_index(), "Missing.lnk", &notifier, &notice));

        let calls = notifier.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Notice");
        assert_eq!(calls[0].1, "Missing has not been downloaded");
    }

    #[test]
    fn test_no_extension_normalization() {
        let notifier = RecordingNotifier::default();
        let notice = PresenceNotice::for_shortcut("App");
        assert!(!is_present(&app_index(), "App", &notifier, &notice));
        assert_eq!(notifier.calls.borrow().len(), 1);
    }

    #[test]
    fn test_notice_keeps_dotted_version() {
        let notice = PresenceNotice::for_shortcut("院校子系统基本版 2020.5.lnk");
        assert_eq!(notice.message, "院校子系统基本版 2020.5 has not been downloaded");
    }
}
