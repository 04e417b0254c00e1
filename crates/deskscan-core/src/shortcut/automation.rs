//! The narrow shell-automation surface the resolver depends on.
//!
//! Three operations are needed: open a shortcut interpreter bound to a file,
//! read its target path, and release it. Release is `Drop` on the boxed
//! link; the facility itself is released when the session is dropped.

use crate::error::Result;
use std::path::Path;

/// A platform facility able to interpret shortcut files.
///
/// Implementors are scoped sessions: acquiring one initializes the
/// facility and dropping it tears the facility down again.
pub trait ShellAutomation {
    /// Create a shortcut interpreter bound to `path`.
    fn open_shortcut(&self, path: &Path) -> Result<Box<dyn ShortcutLink + '_>>;
}

/// An opened shortcut. Dropping it releases the underlying object.
pub trait ShortcutLink {
    /// Read the resolved target path.
    fn target_path(&self) -> Result<String>;
}
