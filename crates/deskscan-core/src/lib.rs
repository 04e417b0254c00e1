//! Deskscan Core - desktop shortcut discovery for Windows.
//!
//! Scans the user and public desktops for `.lnk` files, resolves each one
//! through the shell's COM objects and checks whether an expected
//! application shortcut is present.
//!
//! # Example
//!
//! ```rust,ignore
//! use deskscan_core::{is_present, resolve, DesktopRoots, MessageBoxNotifier};
//! use deskscan_core::{PresenceNotice, ShellSession};
//!
//! fn main() -> deskscan_core::Result<()> {
//!     let session = ShellSession::open()?;
//!     let report = resolve(&session, DesktopRoots::from_env().to_vec());
//!     drop(session);
//!
//!     let notice = PresenceNotice::for_shortcut("Tool.lnk");
//!     is_present(&report.index, "Tool.lnk", &MessageBoxNotifier, &notice);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod presence;
pub mod shortcut;

// Re-export commonly used types
pub use config::{AppConfig, DesktopConfig, PresenceConfig};
pub use error::{DeskscanError, Result};
pub use platform::{DesktopRoots, LogNotifier, MessageBoxNotifier, ShellSession};
pub use presence::{is_present, Notifier, PresenceNotice};
pub use shortcut::{
    resolve, resolve_one_shortcut, ScanDiagnostic, ScanReport, ShellAutomation, ShortcutEntry,
    ShortcutIndex, ShortcutLink, UnresolvedShortcut,
};
