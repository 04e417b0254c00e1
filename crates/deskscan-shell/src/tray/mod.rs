//! Tray menu model.
//!
//! The native tray is owned by the [`AppShell`](crate::AppShell); this module
//! only holds the menu tree and maps clicks to shell calls.

mod demo;
mod menu;

pub use demo::{
    build_demo_tray, greeting, FALLBACK_PAGE_HTML, FRAMELESS_URL, GREETING_BINDING,
    LOCAL_PAGE_HTML, UNREACHABLE_URL,
};
pub use menu::{
    MenuAction, MenuContext, Tray, TrayItem, ALTERNATE_TRAY_ICON, CHECKED_TITLE, UNCHECKED_TITLE,
};
