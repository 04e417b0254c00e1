//! The demo tray menu and the function bound into the page.

use super::menu::{MenuAction, Tray, TrayItem};

pub const GREETING_BINDING: &str = "hostGreeting";
pub const UNREACHABLE_URL: &str = "https://abcd.efgh.ijkl";
pub const FRAMELESS_URL: &str = "https://im.qq.com";
pub const FALLBACK_PAGE_HTML: &str = "<h1>Something went wrong</h1>";
pub const LOCAL_PAGE_HTML: &str = r#"<h1>This is a local page</h1>
<div style="-webkit-app-region: drag">Set the CSS -webkit-app-region: drag to move the window</div>"#;

/// Bound as [`GREETING_BINDING`].
pub fn greeting(name: &str) -> String {
    format!("Hello {name}, OS={}", std::env::consts::OS)
}

/// Build the demo tray.
pub fn build_demo_tray() -> Tray {
    Tray {
        title: "Tray demo".to_string(),
        tooltip: "Click to show the window".to_string(),
        on_click: Some(MenuAction::ShowWindow),
        items: vec![
            TrayItem::checkbox("Checkable item", true),
            TrayItem::action("Change tray icon and tooltip", MenuAction::ChangeTrayIcon),
            TrayItem::action("Open error page", MenuAction::NavigateError),
            TrayItem::action("Open local page", MenuAction::OpenLocalPage),
            TrayItem::submenu(
                "JS interop",
                vec![
                    TrayItem::action("Run alert('hello')", MenuAction::EvalAlert),
                    TrayItem::action("Show all desktop apps", MenuAction::ListStartApps),
                    TrayItem::action("Alert on every page load", MenuAction::InstallInitScript),
                    TrayItem::action("Call host function", MenuAction::CallBoundFunction),
                ],
            ),
            TrayItem::submenu(
                "Window",
                vec![
                    TrayItem::action("Open frameless window", MenuAction::OpenFramelessWindow),
                    TrayItem::action("Show window", MenuAction::ShowWindow),
                    TrayItem::action("Hide window", MenuAction::HideWindow),
                    TrayItem::action("Set window title", MenuAction::SetWindowTitle),
                ],
            ),
            TrayItem::action("Quit", MenuAction::Quit),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_names_os() {
        let text = greeting("tom");
        assert!(text.starts_with("Hello tom, OS="));
        assert!(text.ends_with(std::env::consts::OS));
    }

    #[test]
    fn test_demo_tray_shape() {
        let tray = build_demo_tray();
        assert_eq!(tray.items.len(), 7);
        assert_eq!(tray.on_click, Some(MenuAction::ShowWindow));
        assert!(tray.items[0].checkbox && tray.items[0].checked);
        assert_eq!(tray.find(&["JS interop"]).unwrap().items.len(), 4);
        assert_eq!(
            tray.items.last().unwrap().action,
            Some(MenuAction::Quit)
        );
    }
}
