//! Start-menu application listing through PowerShell.

use crate::app_shell::AppShell;
use deskscan_core::{DeskscanError, Result};
use std::process::Command;
use tracing::{debug, info, warn};

const POWERSHELL: &str = "powershell";
const LIST_START_APPS_SCRIPT: &str = "Get-StartApps | Where-Object { $_.AppID -notlike 'Microsoft.*' } | Select-Object -ExpandProperty Name";

/// Source of installed start-menu application names.
pub trait StartAppsSource {
    fn list(&self) -> Result<Vec<String>>;
}

/// Runs `Get-StartApps`, skipping Microsoft's own apps.
#[derive(Debug, Default, Clone, Copy)]
pub struct PowerShellStartApps;

impl StartAppsSource for PowerShellStartApps {
    fn list(&self) -> Result<Vec<String>> {
        info!("Listing start menu applications");
        let output = Command::new(POWERSHELL)
            .arg("-Command")
            .arg(LIST_START_APPS_SCRIPT)
            .output()
            .map_err(|e| DeskscanError::CommandFailed {
                program: POWERSHELL.to_string(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("{}", stdout);

        if !output.status.success() {
            return Err(DeskscanError::CommandFailed {
                program: POWERSHELL.to_string(),
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(parse_start_apps(&stdout))
    }
}

/// One application name per non-blank line.
pub fn parse_start_apps(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Escape text for use inside a single-quoted JavaScript string.
pub fn js_single_quote_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// List start apps and report them in the page through `alert`s.
pub fn show_start_apps(source: &dyn StartAppsSource, shell: &dyn AppShell) {
    let apps = match source.list() {
        Ok(apps) => apps,
        Err(e) => {
            warn!("Failed to list start apps: {}", e);
            let message = js_single_quote_escape(&e.to_string());
            shell.eval(&format!(
                "console.error('Failed to list apps: {message}'); alert('Failed to list apps, see the console');"
            ));
            return;
        }
    };

    let list = js_single_quote_escape(&apps.join("\n"));
    shell.eval(&format!("alert('App list: {list}')"));
    shell.eval(&format!("alert('App count: {}')", apps.len()));

    let names = js_single_quote_escape(&apps.join(" "));
    shell.eval(&format!("alert('All app names: {names}')"));
    info!("Reported {} start apps", apps.len());
}
