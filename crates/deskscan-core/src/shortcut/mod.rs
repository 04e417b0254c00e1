//! Desktop shortcut discovery and resolution.

mod automation;
mod entry;
mod index;
mod resolver;

pub use automation::{ShellAutomation, ShortcutLink};
pub use entry::{ShortcutEntry, UnresolvedShortcut};
pub use index::ShortcutIndex;
pub use resolver::{is_shortcut_file, resolve, resolve_one_shortcut, ScanDiagnostic, ScanReport};
