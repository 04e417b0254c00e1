//! Window and tray plumbing for the Deskscan demo.
//!
//! - [`AppShell`] - the window/WebView/tray host the demo drives
//! - [`tray`] - menu tree, click dispatch and the demo menu
//! - [`start_apps`] - start-menu application listing

mod app_shell;
pub mod start_apps;
pub mod tray;

pub use app_shell::{AppShell, BoundFn, HeadlessShell, ShellCall, WindowOptions};
pub use start_apps::{PowerShellStartApps, StartAppsSource};
pub use tray::{build_demo_tray, MenuAction, MenuContext, Tray, TrayItem};
