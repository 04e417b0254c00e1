//! Resolved shortcut values.

use crate::error::DeskscanError;
use std::path::Path;
use thiserror::Error;

/// A discovered shortcut file and the path it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEntry {
    name: String,
    target_path: String,
}

impl ShortcutEntry {
    pub fn new(name: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_path: target_path.into(),
        }
    }

    /// An entry named after `path` with no target yet.
    pub fn unresolved(path: &Path) -> Self {
        Self::new(base_name(path), String::new())
    }

    /// File base name, extension included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved target. Empty when resolution failed.
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.target_path)
    }
}

/// A shortcut that could not be resolved.
///
/// The carried entry keeps its name but has an empty target, so callers
/// must look at the error rather than at the entry alone.
#[derive(Debug, Error)]
#[error("Failed to resolve shortcut {}: {source}", entry.name())]
pub struct UnresolvedShortcut {
    pub entry: ShortcutEntry,
    #[source]
    pub source: DeskscanError,
}

/// Base file name of `path`, lossily converted.
pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_entry_keeps_name() {
        let entry = ShortcutEntry::unresolved(Path::new("desk/Game.lnk"));
        assert_eq!(entry.name(), "Game.lnk");
        assert!(entry.target_path().is_empty());
    }

    #[test]
    fn test_unresolved_error_message() {
        let err = UnresolvedShortcut {
            entry: ShortcutEntry::unresolved(Path::new("Broken.lnk")),
            source: DeskscanError::Other("bad header".into()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to resolve shortcut Broken.lnk: bad header"
        );
    }
}
