//! The window/WebView/tray collaborator.
//!
//! Deskscan never hosts a WebView itself. It drives whatever implements
//! [`AppShell`]; [`HeadlessShell`] is the implementation used when no real
//! window is available.

use crate::tray::TrayItem;
use deskscan_core::AppConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// A function exposed to page JavaScript.
pub type BoundFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options for a new top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub start_url: String,
    pub width: u32,
    pub height: u32,
    pub center: bool,
    pub frameless: bool,
    /// Shown when navigation fails.
    pub fallback_page: String,
    pub auto_focus: bool,
    /// Hide instead of destroying the window when it is closed.
    pub hide_on_close: bool,
    pub debug: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: AppConfig::WINDOW_TITLE.to_string(),
            start_url: AppConfig::START_URL.to_string(),
            width: AppConfig::WINDOW_WIDTH,
            height: AppConfig::WINDOW_HEIGHT,
            center: true,
            frameless: false,
            fallback_page: crate::tray::FALLBACK_PAGE_HTML.to_string(),
            auto_focus: true,
            hide_on_close: true,
            debug: false,
        }
    }
}

/// Operations the demo needs from the window and tray host.
pub trait AppShell {
    fn show(&self);
    fn hide(&self);
    fn navigate(&self, url: &str);
    fn eval(&self, script: &str);
    /// Install a script that runs on every page load.
    fn init_script(&self, script: &str);
    fn set_title(&self, title: &str);
    fn set_html(&self, html: &str);
    fn bind(&self, name: &str, callback: BoundFn);
    fn destroy(&self);
    fn open_window(&self, options: WindowOptions);
    fn set_tray_icon(&self, icon: &[u8]);
    fn set_tray_tooltip(&self, tooltip: &str);
    /// Push a changed menu item (title or checked state) to the native tray.
    fn update_menu_item(&self, item: &TrayItem);
}

/// A call received by [`HeadlessShell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCall {
    Show,
    Hide,
    Navigate(String),
    Eval(String),
    InitScript(String),
    SetTitle(String),
    SetHtml(String),
    Bind(String),
    Destroy,
    OpenWindow(WindowOptions),
    SetTrayIcon(usize),
    SetTrayTooltip(String),
    UpdateMenuItem { title: String, checked: bool },
}

/// An [`AppShell`] without a window: every call is logged and recorded.
#[derive(Default)]
pub struct HeadlessShell {
    options: WindowOptions,
    calls: Mutex<Vec<ShellCall>>,
    bindings: Mutex<HashMap<String, BoundFn>>,
}

impl HeadlessShell {
    pub fn new(options: WindowOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<ShellCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Invoke a bound function the way page JavaScript would.
    pub fn call_bound(&self, name: &str, arg: &str) -> Option<String> {
        let callback = match self.bindings.lock() {
            Ok(bindings) => bindings.get(name).cloned(),
            Err(poisoned) => poisoned.into_inner().get(name).cloned(),
        };
        callback.map(|f| f(arg))
    }

    fn record(&self, call: ShellCall) {
        info!("shell: {:?}", call);
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
    }
}

impl AppShell for HeadlessShell {
    fn show(&self) {
        self.record(ShellCall::Show);
    }

    fn hide(&self) {
        self.record(ShellCall::Hide);
    }

    fn navigate(&self, url: &str) {
        self.record(ShellCall::Navigate(url.to_string()));
    }

    fn eval(&self, script: &str) {
        self.record(ShellCall::Eval(script.to_string()));
    }

    fn init_script(&self, script: &str) {
        self.record(ShellCall::InitScript(script.to_string()));
    }

    fn set_title(&self, title: &str) {
        self.record(ShellCall::SetTitle(title.to_string()));
    }

    fn set_html(&self, html: &str) {
        self.record(ShellCall::SetHtml(html.to_string()));
    }

    fn bind(&self, name: &str, callback: BoundFn) {
        match self.bindings.lock() {
            Ok(mut bindings) => {
                bindings.insert(name.to_string(), callback);
            }
            Err(_) => {
                warn!("Binding table poisoned; {} not bound", name);
                return;
            }
        }
        self.record(ShellCall::Bind(name.to_string()));
    }

    fn destroy(&self) {
        self.record(ShellCall::Destroy);
    }

    fn open_window(&self, options: WindowOptions) {
        self.record(ShellCall::OpenWindow(options));
    }

    fn set_tray_icon(&self, icon: &[u8]) {
        self.record(ShellCall::SetTrayIcon(icon.len()));
    }

    fn set_tray_tooltip(&self, tooltip: &str) {
        self.record(ShellCall::SetTrayTooltip(tooltip.to_string()));
    }

    fn update_menu_item(&self, item: &TrayItem) {
        self.record(ShellCall::UpdateMenuItem {
            title: item.title.clone(),
            checked: item.checked,
        });
    }
}
