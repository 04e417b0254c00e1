//! Tray menu tree and click dispatch.

use crate::app_shell::{AppShell, WindowOptions};
use crate::start_apps::{show_start_apps, StartAppsSource};
use deskscan_core::{DeskscanError, Result};
use tracing::debug;

/// Icon swapped in by [`MenuAction::ChangeTrayIcon`].
pub const ALTERNATE_TRAY_ICON: &[u8] = include_bytes!("../../assets/tray.ico");

pub const CHECKED_TITLE: &str = "Checked";
pub const UNCHECKED_TITLE: &str = "Unchecked";

/// Actions that can be triggered from the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Flip the item's checkbox; handled by the tray itself.
    ToggleCheck,
    ChangeTrayIcon,
    /// Navigate to an unreachable host to show the fallback page.
    NavigateError,
    OpenLocalPage,
    EvalAlert,
    ListStartApps,
    InstallInitScript,
    CallBoundFunction,
    OpenFramelessWindow,
    ShowWindow,
    HideWindow,
    SetWindowTitle,
    Quit,
}

/// What menu actions act upon.
pub struct MenuContext<'a> {
    pub shell: &'a dyn AppShell,
    pub start_apps: &'a dyn StartAppsSource,
}

impl MenuAction {
    /// Perform the action. `ToggleCheck` is a no-op here.
    pub fn dispatch(&self, ctx: &MenuContext<'_>) {
        let shell = ctx.shell;
        match self {
            MenuAction::ToggleCheck => {}
            MenuAction::ChangeTrayIcon => {
                shell.set_tray_icon(ALTERNATE_TRAY_ICON);
                shell.set_tray_tooltip("Tooltip changed from the menu");
            }
            MenuAction::NavigateError => shell.navigate(super::demo::UNREACHABLE_URL),
            MenuAction::OpenLocalPage => shell.set_html(super::demo::LOCAL_PAGE_HTML),
            MenuAction::EvalAlert => shell.eval("alert('hello')"),
            MenuAction::ListStartApps => show_start_apps(ctx.start_apps, shell),
            MenuAction::InstallInitScript => {
                shell.init_script("alert('This runs every time a page loads')")
            }
            MenuAction::CallBoundFunction => shell.eval(&format!(
                "{}('tom').then(s => alert(s))",
                super::demo::GREETING_BINDING
            )),
            MenuAction::OpenFramelessWindow => shell.open_window(WindowOptions {
                start_url: super::demo::FRAMELESS_URL.to_string(),
                frameless: true,
                center: true,
                ..WindowOptions::default()
            }),
            MenuAction::ShowWindow => shell.show(),
            MenuAction::HideWindow => shell.hide(),
            MenuAction::SetWindowTitle => shell.set_title("This is the new title"),
            MenuAction::Quit => shell.destroy(),
        }
    }
}

/// A single menu entry, possibly with a submenu.
#[derive(Debug, Clone, Default)]
pub struct TrayItem {
    pub title: String,
    /// Whether the item shows a checkbox.
    pub checkbox: bool,
    pub checked: bool,
    pub action: Option<MenuAction>,
    pub items: Vec<TrayItem>,
}

impl TrayItem {
    pub fn action(title: impl Into<String>, action: MenuAction) -> Self {
        Self {
            title: title.into(),
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn submenu(title: impl Into<String>, items: Vec<TrayItem>) -> Self {
        Self {
            title: title.into(),
            items,
            ..Self::default()
        }
    }

    pub fn checkbox(title: impl Into<String>, checked: bool) -> Self {
        Self {
            title: title.into(),
            checkbox: true,
            checked,
            action: Some(MenuAction::ToggleCheck),
            items: Vec::new(),
        }
    }

    /// Flip the checkbox and retitle the item after its new state.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
        self.title = if self.checked {
            CHECKED_TITLE
        } else {
            UNCHECKED_TITLE
        }
        .to_string();
    }
}

/// The tray icon and its menu.
#[derive(Debug, Clone, Default)]
pub struct Tray {
    pub title: String,
    pub tooltip: String,
    /// Triggered by clicking the icon itself.
    pub on_click: Option<MenuAction>,
    pub items: Vec<TrayItem>,
}

impl Tray {
    /// Find an item by its title path, e.g. `["Window", "Show window"]`.
    pub fn find(&self, path: &[&str]) -> Option<&TrayItem> {
        let (first, rest) = path.split_first()?;
        let mut item = self.items.iter().find(|i| i.title == *first)?;
        for title in rest {
            item = item.items.iter().find(|i| i.title == *title)?;
        }
        Some(item)
    }

    fn find_mut(&mut self, path: &[&str]) -> Option<&mut TrayItem> {
        let (first, rest) = path.split_first()?;
        let mut item = self.items.iter_mut().find(|i| i.title == *first)?;
        for title in rest {
            item = item.items.iter_mut().find(|i| i.title == *title)?;
        }
        Some(item)
    }

    /// Click the item at `path`.
    ///
    /// Checkbox items are toggled and pushed back to the shell before their
    /// action runs. Items without an action (submenus) do nothing.
    pub fn click(&mut self, path: &[&str], ctx: &MenuContext<'_>) -> Result<()> {
        let item = self
            .find_mut(path)
            .ok_or_else(|| DeskscanError::MenuItemNotFound(path.join("/")))?;
        debug!("Menu click: {}", path.join("/"));

        if item.checkbox {
            item.toggle();
            ctx.shell.update_menu_item(item);
        }
        if let Some(action) = item.action.clone() {
            action.dispatch(ctx);
        }
        Ok(())
    }

    /// Click the tray icon.
    pub fn click_icon(&self, ctx: &MenuContext<'_>) {
        if let Some(action) = &self.on_click {
            action.dispatch(ctx);
        }
    }
}
